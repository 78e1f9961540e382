mod home;
pub use home::Home;

mod stats;
pub use stats::Stats;

mod upload;
pub use upload::Upload;
