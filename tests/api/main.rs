//! HTTP-level tests against the real router.
//!
//! Tests built on `TestApp::new` use a pool that never connects, so they
//! cover what is decided before the database. Tests built on
//! `TestApp::with_database` need `DATABASE_URL` pointing at a scratch
//! Postgres database and return early when it is unset.

mod helpers;

mod account_test;
mod admin_test;
mod auth_test;
mod file_test;
mod folder_test;
mod form_test;
mod health_test;
mod public_test;
mod session_test;
