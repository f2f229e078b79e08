//! Named User-Agent presets.
//!
//! Sites often redirect crawlers, phones, and desktop browsers differently, so
//! a chain can be resolved as any of the clients below via
//! `--user-agent-preset <id>`.

use serde::Serialize;
use strum_macros::{Display, EnumIter, EnumString};

/// Grouping used when listing presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, EnumIter)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum UserAgentCategory {
    DesktopBrowsers,
    MobileBrowsers,
    SearchBots,
    SocialMediaBots,
    GamingPlatforms,
    SpecialDevices,
    ToolsApi,
}

impl UserAgentCategory {
    pub fn label(self) -> &'static str {
        match self {
            UserAgentCategory::DesktopBrowsers => "Desktop Browsers",
            UserAgentCategory::MobileBrowsers => "Mobile Browsers",
            UserAgentCategory::SearchBots => "Search Engine Bots",
            UserAgentCategory::SocialMediaBots => "Social Media Crawlers",
            UserAgentCategory::GamingPlatforms => "Gaming Platforms",
            UserAgentCategory::SpecialDevices => "Special Devices",
            UserAgentCategory::ToolsApi => "Tools & APIs",
        }
    }
}

/// A selectable User-Agent string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Preset {
    pub id: &'static str,
    pub label: &'static str,
    pub category: UserAgentCategory,
    pub user_agent: &'static str,
    pub popular: bool,
}

const fn preset(
    id: &'static str,
    label: &'static str,
    category: UserAgentCategory,
    user_agent: &'static str,
    popular: bool,
) -> Preset {
    Preset {
        id,
        label,
        category,
        user_agent,
        popular,
    }
}

use UserAgentCategory::*;

pub const PRESETS: &[Preset] = &[
    // Desktop browsers
    preset(
        "chrome-latest-win",
        "Chrome (Latest) - Windows",
        DesktopBrowsers,
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
        true,
    ),
    preset(
        "chrome-latest-mac",
        "Chrome (Latest) - macOS",
        DesktopBrowsers,
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
        true,
    ),
    preset(
        "firefox-latest-win",
        "Firefox (Latest) - Windows",
        DesktopBrowsers,
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0",
        true,
    ),
    preset(
        "firefox-latest-mac",
        "Firefox (Latest) - macOS",
        DesktopBrowsers,
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:121.0) Gecko/20100101 Firefox/121.0",
        false,
    ),
    preset(
        "safari-latest-mac",
        "Safari (Latest) - macOS",
        DesktopBrowsers,
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.2 Safari/605.1.15",
        true,
    ),
    preset(
        "edge-latest-win",
        "Edge (Latest) - Windows",
        DesktopBrowsers,
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36 Edg/120.0.0.0",
        false,
    ),
    // Mobile browsers
    preset(
        "chrome-android",
        "Chrome - Android",
        MobileBrowsers,
        "Mozilla/5.0 (Linux; Android 13) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.6099.144 Mobile Safari/537.36",
        true,
    ),
    preset(
        "safari-iphone",
        "Safari - iPhone",
        MobileBrowsers,
        "Mozilla/5.0 (iPhone; CPU iPhone OS 17_2 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.2 Mobile/15E148 Safari/604.1",
        true,
    ),
    preset(
        "safari-ipad",
        "Safari - iPad",
        MobileBrowsers,
        "Mozilla/5.0 (iPad; CPU OS 17_2 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.2 Mobile/15E148 Safari/604.1",
        false,
    ),
    preset(
        "samsung-browser",
        "Samsung Internet",
        MobileBrowsers,
        "Mozilla/5.0 (Linux; Android 13; SM-S918B) AppleWebKit/537.36 (KHTML, like Gecko) SamsungBrowser/23.0 Chrome/115.0.0.0 Mobile Safari/537.36",
        false,
    ),
    // Search engine bots
    preset(
        "googlebot",
        "Googlebot",
        SearchBots,
        "Mozilla/5.0 (compatible; Googlebot/2.1; +http://www.google.com/bot.html)",
        true,
    ),
    preset(
        "googlebot-mobile",
        "Googlebot Smartphone",
        SearchBots,
        "Mozilla/5.0 (Linux; Android 6.0.1; Nexus 5X Build/MMB29P) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.6099.144 Mobile Safari/537.36 (compatible; Googlebot/2.1; +http://www.google.com/bot.html)",
        true,
    ),
    preset(
        "bingbot",
        "Bingbot",
        SearchBots,
        "Mozilla/5.0 (compatible; bingbot/2.0; +http://www.bing.com/bingbot.htm)",
        true,
    ),
    preset(
        "yandexbot",
        "YandexBot",
        SearchBots,
        "Mozilla/5.0 (compatible; YandexBot/3.0; +http://yandex.com/bots)",
        false,
    ),
    preset(
        "baiduspider",
        "Baiduspider",
        SearchBots,
        "Mozilla/5.0 (compatible; Baiduspider/2.0; +http://www.baidu.com/search/spider.html)",
        false,
    ),
    preset(
        "duckduckbot",
        "DuckDuckBot",
        SearchBots,
        "DuckDuckBot/1.0; (+http://duckduckgo.com/duckduckbot.html)",
        false,
    ),
    // Social media crawlers
    preset(
        "facebookbot",
        "Facebook Crawler",
        SocialMediaBots,
        "facebookexternalhit/1.1 (+http://www.facebook.com/externalhit_uatext.php)",
        true,
    ),
    preset("twitterbot", "Twitterbot", SocialMediaBots, "Twitterbot/1.0", true),
    preset(
        "linkedinbot",
        "LinkedIn Bot",
        SocialMediaBots,
        "LinkedInBot/1.0 (compatible; Mozilla/5.0; +https://www.linkedin.com/)",
        false,
    ),
    preset(
        "slackbot",
        "Slackbot",
        SocialMediaBots,
        "Slackbot-LinkExpanding 1.0 (+https://api.slack.com/robots)",
        false,
    ),
    // Gaming platforms
    preset(
        "ps5",
        "PlayStation 5",
        GamingPlatforms,
        "Mozilla/5.0 (PlayStation 5 7.00) AppleWebKit/605.1.15 (KHTML, like Gecko)",
        false,
    ),
    preset(
        "xbox-series-x",
        "Xbox Series X",
        GamingPlatforms,
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64; Xbox; Xbox Series X) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36 Edge/44.18363.8131",
        false,
    ),
    preset(
        "nintendo-switch",
        "Nintendo Switch",
        GamingPlatforms,
        "Mozilla/5.0 (Nintendo Switch; WebApplet) AppleWebKit/609.4 (KHTML, like Gecko) NF/6.0.2.21.3 NintendoBrowser/5.1.0.22474",
        false,
    ),
    // Special devices
    preset(
        "kindle-fire",
        "Kindle Fire",
        SpecialDevices,
        "Mozilla/5.0 (Linux; Android 7.1.2; KFKAWI Build/NS6312) AppleWebKit/537.36 (KHTML, like Gecko) Silk/120.1 like Chrome/120.0.0.0 Safari/537.36",
        false,
    ),
    preset(
        "smart-tv-samsung",
        "Samsung Smart TV",
        SpecialDevices,
        "Mozilla/5.0 (SMART-TV; Linux; Tizen 6.0) AppleWebKit/537.36 (KHTML, like Gecko) SamsungBrowser/4.0 Chrome/108.0.5359.146 TV Safari/537.36",
        false,
    ),
    // Tools and APIs
    preset("curl", "cURL", ToolsApi, "curl/8.0.1", false),
    preset("wget", "Wget", ToolsApi, "Wget/1.21.3", false),
    preset("postman", "Postman", ToolsApi, "PostmanRuntime/7.32.3", false),
    preset(
        "python-requests",
        "Python Requests",
        ToolsApi,
        "python-requests/2.31.0",
        false,
    ),
];

/// Looks up a preset by id (case-insensitive).
pub fn find_preset(id: &str) -> Option<&'static Preset> {
    let id = id.trim();
    PRESETS.iter().find(|p| p.id.eq_ignore_ascii_case(id))
}

pub fn presets_in(category: UserAgentCategory) -> impl Iterator<Item = &'static Preset> {
    PRESETS.iter().filter(move |p| p.category == category)
}

pub fn popular_presets() -> impl Iterator<Item = &'static Preset> {
    PRESETS.iter().filter(|p| p.popular)
}

/// Presets whose label or User-Agent string contains `query` (case-insensitive).
pub fn search_presets(query: &str) -> Vec<&'static Preset> {
    let query = query.to_lowercase();
    PRESETS
        .iter()
        .filter(|p| {
            p.label.to_lowercase().contains(&query) || p.user_agent.to_lowercase().contains(&query)
        })
        .collect()
}
