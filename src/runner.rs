use std::io;
use std::time::Duration;

use crate::app::CodepadApp;
use crate::drivers::{InputDriver, OutputDriver};
use crate::event_loop::{ControlFlow, EventLoop};

/// Drive `app` until it asks to quit: input is routed to
/// [`CodepadApp::handle_event`] and a frame is drawn on every idle tick.
pub fn run_app<O, D>(
    output: &mut O,
    driver: &mut D,
    app: &mut CodepadApp,
    poll_interval: Duration,
) -> io::Result<()>
where
    O: OutputDriver,
    D: InputDriver,
{
    let mut event_loop = EventLoop::new(driver, poll_interval);
    event_loop.driver().set_mouse_capture(true)?;

    event_loop.run(|_driver, event| {
        if let Some(evt) = event {
            app.handle_event(&evt);
            if app.should_quit() {
                tracing::debug!("quit requested");
                return Ok(ControlFlow::Quit);
            }
            return Ok(ControlFlow::Continue);
        }
        output.draw(|mut frame| app.render(&mut frame))?;
        Ok(ControlFlow::Continue)
    })
}
