//! Test support utilities.

pub mod capture;
pub mod env;
pub mod ini;

pub use capture::SharedBuffer;
pub use env::ScopedEnv;
pub use ini::IniFixture;
