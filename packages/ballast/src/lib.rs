#![allow(non_snake_case)]
pub mod engine;
pub mod helpers;
pub mod oracle;
