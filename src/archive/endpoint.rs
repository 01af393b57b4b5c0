use semver::Version;

// Releases up to 1.9.2 were published on Google Code; later builds moved to
// the Bitbucket CDN.
const GOOGLE_CODE: &str = "https://phantomjs.googlecode.com/files/";
const BITBUCKET: &str = "http://cdn.bitbucket.org/ariya/phantomjs/downloads/";

fn legacy_version() -> Version {
    Version::new(1, 9, 2)
}

/// Base download URL for a release. A caller-supplied override always wins;
/// otherwise the version decides between the legacy and current endpoints.
/// The returned URL always carries a trailing slash.
pub fn base_url(version: &Version, override_url: Option<&str>) -> String {
    let url = match override_url {
        Some(url) => url.to_string(),
        None if *version <= legacy_version() => GOOGLE_CODE.to_string(),
        None => BITBUCKET.to_string(),
    };
    if url.ends_with('/') { url } else { format!("{url}/") }
}
