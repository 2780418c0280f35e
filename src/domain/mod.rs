//! Domain layer containing business entities and repository contracts.
//!
//! This module is independent of infrastructure concerns. It defines the
//! persisted entities, the shape of an incoming upstream record, the outcome
//! log produced by a sync run, and the traits the application layer relies on
//! to reach storage and the upstream source.
//!
//! # Architecture
//!
//! - [`entities`] - Regions, countries, top-level domains and derived stats
//! - [`repositories`] - Entity store trait definitions
//! - [`country_record`] - One record of the upstream country list
//! - [`country_source`] - Contract for fetching the upstream list
//! - [`sync_report`] - Per-entity outcomes of a sync run
//!
//! # Sync Flow
//!
//! 1. A [`country_source::CountrySource`] returns the full list of records
//! 2. [`crate::application::services::SyncService`] walks the list in order
//! 3. [`crate::application::services::Reconciler`] merges each record into the store
//! 4. Outcomes are collected into a [`sync_report::SyncReport`]

pub mod country_record;
pub mod country_source;
pub mod entities;
pub mod repositories;
pub mod sync_report;
