//! Quality curve module

mod simple;


pub use simple::*;
