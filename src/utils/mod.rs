pub mod datetime;
pub mod feedback;
pub mod logging;
pub mod markdown;
pub mod money;
pub mod validation;
