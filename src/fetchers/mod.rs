mod request;
mod tikwm;

pub use request::{RequestFetcher, BROWSER_USER_AGENT};
pub use tikwm::{TikwmFetcher, VideoInfo};
