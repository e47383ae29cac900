//! HPACK static table (RFC 7541 Appendix A).
//!
//! The encoder only ever references static entries by *name*: value-level
//! matches (e.g. `:method: GET`) matter for request encoding, but response
//! headers almost never hit one, so we store the 61 entry names and resolve
//! values through the dynamic table instead. Indices are 1-based on the wire;
//! index 0 is unused.

/// Entry names of the static table, in wire order (index 1 through 61).
pub static STATIC_NAMES: [&str; 61] = [
    ":authority",                  //  1
    ":method",                     //  2
    ":method",                     //  3
    ":path",                       //  4
    ":path",                       //  5
    ":scheme",                     //  6
    ":scheme",                     //  7
    ":status",                     //  8
    ":status",                     //  9
    ":status",                     // 10
    ":status",                     // 11
    ":status",                     // 12
    ":status",                     // 13
    ":status",                     // 14
    "accept-charset",              // 15
    "accept-encoding",             // 16
    "accept-language",             // 17
    "accept-ranges",               // 18
    "accept",                      // 19
    "access-control-allow-origin", // 20
    "age",                         // 21
    "allow",                       // 22
    "authorization",               // 23
    "cache-control",               // 24
    "content-disposition",         // 25
    "content-encoding",            // 26
    "content-language",            // 27
    "content-length",              // 28
    "content-location",            // 29
    "content-range",               // 30
    "content-type",                // 31
    "cookie",                      // 32
    "date",                        // 33
    "etag",                        // 34
    "expect",                      // 35
    "expires",                     // 36
    "from",                        // 37
    "host",                        // 38
    "if-match",                    // 39
    "if-modified-since",           // 40
    "if-none-match",               // 41
    "if-range",                    // 42
    "if-unmodified-since",         // 43
    "last-modified",               // 44
    "link",                        // 45
    "location",                    // 46
    "max-forwards",                // 47
    "proxy-authenticate",          // 48
    "proxy-authorization",         // 49
    "range",                       // 50
    "referer",                     // 51
    "refresh",                     // 52
    "retry-after",                 // 53
    "server",                      // 54
    "set-cookie",                  // 55
    "strict-transport-security",   // 56
    "transfer-encoding",           // 57
    "user-agent",                  // 58
    "vary",                        // 59
    "via",                         // 60
    "www-authenticate",            // 61
];

/// Number of static table entries. Dynamic table indices start right after.
pub const STATIC_TABLE_SIZE: usize = 61;

/// Index of the `:status` name (first of the seven status entries).
pub const STATUS: usize = 8;

/// Index of `content-disposition`.
pub const CONTENT_DISPOSITION: usize = 25;

/// Index of `content-length`.
pub const CONTENT_LENGTH: usize = 28;

/// Index of `set-cookie`.
pub const SET_COOKIE: usize = 55;

/// Look up the 1-based static index for a header name (case-insensitive).
///
/// Returns the first entry carrying that name, which is what literal
/// representations reference.
pub fn name_index(name: &str) -> Option<usize> {
    STATIC_NAMES
        .iter()
        .position(|n| n.eq_ignore_ascii_case(name))
        .map(|pos| pos + 1)
}

/// Static index for a `:status` value, for the seven codes the table carries.
pub fn status_index(status: u16) -> Option<usize> {
    match status {
        200 => Some(8),
        204 => Some(9),
        206 => Some(10),
        304 => Some(11),
        400 => Some(12),
        404 => Some(13),
        500 => Some(14),
        _ => None,
    }
}
