//! Web front end

pub mod api;
pub mod pages;
