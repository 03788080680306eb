//! Zone resolution
//!
//! Maps a record name onto the hosted zone that owns it.

use crate::api::Zone;

/// Find the zone owning `name`
///
/// A zone owns `name` when the two are equal or when `name` ends with
/// `"." + zone.name`. The first owning zone in `zones` order wins, which is
/// not necessarily the most specific one when zones overlap
/// (`a.example.com` listed after `example.com` never wins).
///
/// `None` means no zone owns the name; callers skip such records.
pub fn zone_of_record<'a>(zones: &'a [Zone], name: &str) -> Option<&'a Zone> {
    zones.iter().find(|zone| owns(&zone.name, name))
}

fn owns(zone_name: &str, name: &str) -> bool {
    name == zone_name
        || name
            .strip_suffix(zone_name)
            .is_some_and(|prefix| prefix.ends_with('.'))
}
