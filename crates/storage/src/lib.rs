#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod json;
pub mod memory;

#[cfg(test)]
mod tests {
    pub mod data;
}
