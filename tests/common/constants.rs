//! Shared constants for end-to-end tests
//!
//! When the seeded listings change, update only this file and fixtures.rs.

// ============================================================================
// Seeded Venues
// ============================================================================

/// "The Musical Hop", San Francisco, CA. One past and one upcoming show.
pub const VENUE_HOP_ID: i64 = 1;
pub const VENUE_HOP_NAME: &str = "The Musical Hop";

/// "Park Square Live Music & Coffee", San Francisco, CA. No shows.
pub const VENUE_PARK_ID: i64 = 2;
pub const VENUE_PARK_NAME: &str = "Park Square Live Music & Coffee";

/// "The Dueling Pianos Bar", New York, NY. Two upcoming shows.
pub const VENUE_PIANOS_ID: i64 = 3;
pub const VENUE_PIANOS_NAME: &str = "The Dueling Pianos Bar";

// ============================================================================
// Seeded Artists
// ============================================================================

/// "Guns N Petals". One past show at the Musical Hop.
pub const ARTIST_PETALS_ID: i64 = 1;
pub const ARTIST_PETALS_NAME: &str = "Guns N Petals";

/// "Matt Quevedo". One upcoming show at the Musical Hop.
pub const ARTIST_QUEVEDO_ID: i64 = 2;
pub const ARTIST_QUEVEDO_NAME: &str = "Matt Quevedo";

/// "The Wild Sax Band". Two upcoming shows at the Dueling Pianos Bar.
pub const ARTIST_SAX_ID: i64 = 3;
pub const ARTIST_SAX_NAME: &str = "The Wild Sax Band";

pub const SEEDED_SHOWS: usize = 4;

// ============================================================================
// Timeouts
// ============================================================================

/// Maximum time to wait for server to become ready (milliseconds)
pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;

/// Interval between readiness checks (milliseconds)
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 10;

/// Default timeout for HTTP requests (seconds)
pub const REQUEST_TIMEOUT_SECS: u64 = 5;
