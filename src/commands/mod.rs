pub mod completions;
pub mod configure;
pub mod rotate;

pub use completions::CompletionsCommand;
pub use configure::ConfigureCommand;
pub use rotate::RotateCommand;
