//! # IO Module
//!
//! The interface layer that exposes the domain services over HTTP.

pub mod rest;
