//! EV charging trip planner server for Chile.
//!
//! A web application that answers: "I'm driving this route in this car,
//! where should I stop to charge?"

pub mod cache;
pub mod domain;
pub mod filter;
pub mod planner;
pub mod sources;
pub mod spatial;
pub mod web;
