mod city_handler;

pub use city_handler::*;
