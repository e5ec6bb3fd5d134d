//! Referral summary loading and share links

use flowva_core::{Error, Points, ReferralSummary, Result, RewardsBackend, UserId};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, error};

/// Points credited per successful referral
///
/// Client-side copy of the backend's award; the referral rows do not carry
/// the amount, so a change on the backend must be mirrored here.
pub const POINTS_PER_REFERRAL: u64 = 25;

/// Build the summary from the two sub-fetches
pub fn summarize(referral_code: Option<String>, referral_count: usize) -> ReferralSummary {
    let referral_count = u64::try_from(referral_count).unwrap_or(u64::MAX);
    ReferralSummary {
        referral_code: referral_code.unwrap_or_default(),
        referral_count,
        points_earned: Points(referral_count.saturating_mul(POINTS_PER_REFERRAL)),
    }
}

/// Fetch the referral code and referral list for `user_id`
///
/// Either fetch failing yields one `LoadError`; nothing partial is
/// returned.
pub async fn load_referral_summary<B>(
    backend: &B,
    user_id: Option<&UserId>,
) -> Result<ReferralSummary>
where
    B: RewardsBackend + ?Sized,
{
    let user_id = user_id.ok_or(Error::NotAuthenticated)?;

    let load_error = |what: &str, e: Error| {
        error!("Referral load failed ({}): {}", what, e);
        Error::LoadError(e.message())
    };

    let rewards = backend
        .get_user_rewards(user_id)
        .await
        .map_err(|e| load_error("user_rewards", e))?;
    let referrals = backend
        .get_user_referrals(user_id)
        .await
        .map_err(|e| load_error("referrals", e))?;

    let summary = summarize(rewards.and_then(|r| r.referral_code), referrals.len());
    debug!(
        "Referral summary: {} referrals, {} points",
        summary.referral_count, summary.points_earned
    );
    Ok(summary)
}

/// `{origin}/signup?ref={code}`, or `None` without a code
pub fn referral_link(origin: &str, referral_code: &str) -> Option<String> {
    if referral_code.is_empty() {
        return None;
    }
    Some(format!(
        "{}/signup?ref={}",
        origin.trim_end_matches('/'),
        urlencoding::encode(referral_code)
    ))
}

/// Social networks offered on the referral card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SharePlatform {
    Facebook,
    Twitter,
    Linkedin,
    Whatsapp,
}

impl SharePlatform {
    pub const ALL: [SharePlatform; 4] = [
        SharePlatform::Facebook,
        SharePlatform::Twitter,
        SharePlatform::Linkedin,
        SharePlatform::Whatsapp,
    ];
}

impl fmt::Display for SharePlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SharePlatform::Facebook => "Facebook",
            SharePlatform::Twitter => "Twitter",
            SharePlatform::Linkedin => "LinkedIn",
            SharePlatform::Whatsapp => "WhatsApp",
        };
        f.pad(name)
    }
}

impl FromStr for SharePlatform {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "facebook" => Ok(SharePlatform::Facebook),
            "twitter" | "x" => Ok(SharePlatform::Twitter),
            "linkedin" => Ok(SharePlatform::Linkedin),
            "whatsapp" => Ok(SharePlatform::Whatsapp),
            other => Err(format!("unknown share platform: {}", other)),
        }
    }
}

/// Text posted alongside the link
pub fn share_message(link: &str) -> String {
    format!(
        "Join me on Flowva and earn rewards! Use my referral link: {}",
        link
    )
}

/// Share-intent URL for `platform`
pub fn share_url(platform: SharePlatform, link: &str) -> String {
    let text = share_message(link);
    let encoded_text = urlencoding::encode(&text);
    let encoded_url = urlencoding::encode(link);

    match platform {
        SharePlatform::Facebook => {
            format!("https://www.facebook.com/sharer/sharer.php?u={}", encoded_url)
        }
        SharePlatform::Twitter => format!("https://twitter.com/intent/tweet?text={}", encoded_text),
        SharePlatform::Linkedin => format!(
            "https://www.linkedin.com/sharing/share-offsite/?url={}",
            encoded_url
        ),
        SharePlatform::Whatsapp => format!("https://wa.me/?text={}", encoded_text),
    }
}
