//! Multimodal freight route planner server.
//!
//! A web application that answers: "what are the best few ways to move this
//! shipment between two hubs, given what the shipper cares about?"

pub mod batch;
pub mod config;
pub mod domain;
pub mod network;
pub mod planner;
pub mod web;
