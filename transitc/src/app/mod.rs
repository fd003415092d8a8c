mod compiler_settings;
mod operation;
mod transitc_app;

pub use compiler_settings::CompilerSettings;
pub use operation::TransitcOperation;
pub use transitc_app::TransitcApp;
