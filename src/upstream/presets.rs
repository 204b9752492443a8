//! Compiled-in provider tables.

use crate::config::ProviderConfig;

/// Public resolvers behind `/dns-query`: (name, url, weight).
const GENERAL: &[(&str, &str, u32)] = &[
    ("Cloudflare", "https://cloudflare-dns.com/dns-query", 50),
    ("Google", "https://dns.google/dns-query", 40),
    ("Quad9 Secure", "https://dns.quad9.net/dns-query", 35),
    ("AdGuard Default", "https://dns.adguard.com/dns-query", 30),
    ("Mullvad Adblock", "https://adblock.dns.mullvad.net/dns-query", 28),
    ("Control D Ads+Trackers", "https://freedns.controld.com/p2", 25),
    ("RethinkDNS Max", "https://max.rethinkdns.com/dns-query", 22),
    ("dns0.eu", "https://dns0.eu/dns-query", 18),
    ("dnsforge.de", "https://dnsforge.de/dns-query", 16),
    ("DNS.sb", "https://doh.dns.sb/dns-query", 18),
    ("Surfshark DNS", "https://doh.surfsharkdns.com/dns-query", 15),
];

/// Filtering resolvers behind `/family/dns-query`.
const FAMILY: &[(&str, &str, u32)] = &[
    ("Cloudflare Families", "https://family.cloudflare-dns.com/dns-query", 55),
    ("CleanBrowsing Family", "https://family-filter-dns.cleanbrowsing.org/dns-query", 50),
    ("CleanBrowsing Adult", "https://adult-filter-dns.cleanbrowsing.org/dns-query", 45),
    ("OpenDNS FamilyShield", "https://familyshield.opendns.com/dns-query", 48),
    ("AdGuard Family", "https://family.adguard-dns.com/dns-query", 40),
];

/// The general-purpose pool.
pub fn general() -> Vec<ProviderConfig> {
    to_configs(GENERAL)
}

/// The family-safe pool.
pub fn family() -> Vec<ProviderConfig> {
    to_configs(FAMILY)
}

fn to_configs(table: &[(&str, &str, u32)]) -> Vec<ProviderConfig> {
    table
        .iter()
        .map(|(name, url, weight)| ProviderConfig {
            name: (*name).to_string(),
            url: (*url).to_string(),
            weight: *weight,
        })
        .collect()
}
