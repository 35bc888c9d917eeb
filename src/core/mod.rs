// ─── Artifact Locator Core ───
// Layered resolution of dependency artifacts to local files.
//
// Architecture:
//   core/
//     maven/      — Artifact coordinates, keys and repository layout
//     mapping/    — Properties mapping resources
//     resolver/   — Resolver strategies + chain builder
//     downloader/ — Cache downloads for the online resolver
//     config      — Settings from JSON and the environment
//     paths       — Search-path lookup and default directories

pub mod config;
pub mod downloader;
pub mod error;
pub mod http;
pub mod mapping;
pub mod maven;
pub mod paths;
pub mod resolver;
