//! Core business types: positions, visited locations, attractions, rewards, users

pub mod cow_list;
pub mod geo;
pub mod types;
pub mod user;
