mod city;

pub use city::{City, CityFilter};
