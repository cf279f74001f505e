pub mod filters;
pub mod strings;
pub mod tags;
pub mod time;
