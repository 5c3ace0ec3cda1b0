pub mod assets;
pub mod cms;
pub mod setup;
