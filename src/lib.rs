//! REST API for CRUD operations on users stored in MongoDB.
//!
//! ```text
//! GET    /users        list every user
//! GET    /users/{id}   fetch one user
//! POST   /users        create a user (name and email required)
//! PUT    /users/{id}   update a user (name and email required)
//! DELETE /users/{id}   delete a user
//! ```

pub mod config;
pub mod constants;
pub mod database;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod openapi;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod utils;
pub mod validators;
