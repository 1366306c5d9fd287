pub mod convert;
pub mod map;
pub mod schema;

mod sample;
mod util;

#[cfg(test)]
mod test_support;

#[cfg(test)]
mod tests;
