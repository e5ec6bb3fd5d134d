//! Flowva CLI - Terminal front-end for the rewards dashboard

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use flowva_core::{DayMarker, RewardTab, RewardsBackend, DEFAULT_CHECK_IN_POINTS};
use flowva_engine::rules::{local_today, POINTS_PER_LEVEL};
use flowva_engine::{
    DashboardController, LoadState, RedeemPanel, ReferralPanel, SessionProvider, SharePlatform,
};
use flowva_networking::api::DEFAULT_TRANSACTION_LIMIT;
use flowva_networking::{ClientConfig, SupabaseAuth, SupabaseClient};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "flowva")]
#[command(author, version, about = "Flowva rewards - points, streaks, referrals and rewards")]
struct Cli {
    /// Access token of an existing session (overrides FLOWVA_ACCESS_TOKEN)
    #[arg(long, global = true)]
    access_token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Points balance, streak and this week's check-ins
    Dashboard,
    /// Claim today's check-in points
    CheckIn,
    /// Referral code, count and share links
    Referrals {
        /// Print the share link for one network only
        #[arg(long)]
        share: Option<SharePlatform>,
    },
    /// Reward catalog for a tab: all, unlocked, locked, coming
    Rewards {
        #[arg(long, default_value = "all")]
        tab: RewardTab,
    },
    /// Recent points activity
    History {
        #[arg(long, default_value_t = DEFAULT_TRANSACTION_LIMIT)]
        limit: u32,
    },
    /// End the current session
    SignOut,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "flowva_cli=info,flowva_engine=info,flowva_networking=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = ClientConfig::from_env().context("Failed to load configuration")?;
    let client = Arc::new(SupabaseClient::new(config.clone())?);
    let auth = Arc::new(SupabaseAuth::new(config.clone())?);

    if let Some(token) = cli.access_token.clone().or_else(|| config.access_token.clone()) {
        match auth.restore_session(&token).await {
            Ok(session) => client.set_access_token(Some(session.access_token)),
            Err(e) => warn!("Could not restore session: {}", e),
        }
    }

    let session = Arc::new(SessionProvider::new(auth.clone()));
    session.init().await;

    if let Some(user) = session.current_user() {
        info!("Signed in as {}", user.display_name());
    }

    let backend: Arc<dyn RewardsBackend> = client.clone();
    let result = match cli.command {
        Command::Dashboard => show_dashboard(backend, session.clone()).await,
        Command::CheckIn => check_in(backend, session.clone()).await,
        Command::Referrals { share } => {
            show_referrals(backend, session.clone(), &config.site_origin, share).await
        }
        Command::Rewards { tab } => {
            show_rewards(tab);
            Ok(())
        }
        Command::History { limit } => show_history(backend, session.clone(), limit).await,
        Command::SignOut => {
            let outcome = session.sign_out().await;
            client.set_access_token(None);
            outcome.context("Sign-out did not reach the server; local session cleared")?;
            println!("Signed out");
            Ok(())
        }
    };

    session.teardown();
    result
}

async fn show_dashboard(
    backend: Arc<dyn RewardsBackend>,
    session: Arc<SessionProvider>,
) -> anyhow::Result<()> {
    let mut dashboard = DashboardController::new(backend, session);
    dashboard.load().await;

    let state = match dashboard.state() {
        LoadState::Ready(state) => state.clone(),
        LoadState::Failed(e) => bail!("{}", e),
        LoadState::Loading => return Ok(()),
    };

    println!("Points:  {}", state.total_points);
    println!("Streak:  {}", state.streak_label());

    let week = dashboard.week_view(local_today());
    let labels: Vec<&str> = week.iter().map(|d| d.label).collect();
    let markers: Vec<&str> = week
        .iter()
        .map(|d| match d.marker() {
            DayMarker::Checked => "x",
            DayMarker::Today => "o",
            DayMarker::Idle => ".",
        })
        .collect();
    println!("Week:    {}", labels.join(" "));
    println!("         {}", markers.join(" "));

    if state.can_check_in_today {
        println!("Check-in available today (+{} pts)", DEFAULT_CHECK_IN_POINTS);
    } else {
        println!("Already checked in today");
    }

    println!("Gift card progress: {:.0}%", dashboard.gift_card_progress());
    if let Some(level) = dashboard.level_progress() {
        println!(
            "Level {}: {} / {} ({} to level {})",
            level.current_level,
            level.points_in_current_level,
            POINTS_PER_LEVEL,
            level.points_to_next_level,
            level.next_level
        );
    }

    dashboard.teardown();
    Ok(())
}

async fn check_in(
    backend: Arc<dyn RewardsBackend>,
    session: Arc<SessionProvider>,
) -> anyhow::Result<()> {
    let mut dashboard = DashboardController::new(backend, session);

    match dashboard.check_in().await {
        Ok(outcome) => {
            println!("Checked in! {}", outcome.badge());
            if let Some(state) = dashboard.state().ready() {
                println!(
                    "Points: {}  Streak: {}",
                    state.total_points,
                    state.streak_label()
                );
            }
            dashboard.acknowledge_notice();
        }
        Err(e) => println!("{}", dashboard.check_in_error().unwrap_or(&e.message())),
    }

    dashboard.teardown();
    Ok(())
}

async fn show_referrals(
    backend: Arc<dyn RewardsBackend>,
    session: Arc<SessionProvider>,
    site_origin: &str,
    share: Option<SharePlatform>,
) -> anyhow::Result<()> {
    let mut panel = ReferralPanel::new(backend, session, site_origin);
    panel.load().await;

    if let Some(message) = panel.error_message() {
        bail!("{}", message);
    }

    if let Some(summary) = panel.state().ready() {
        println!("Referral code:   {}", summary.referral_code);
        println!("Referrals:       {}", summary.referral_count);
        println!("Points earned:   {}", summary.points_earned);
    }

    match panel.link() {
        Some(link) => println!("Referral link:   {}", link),
        None => println!("No referral code yet"),
    }

    let platforms = match share {
        Some(platform) => vec![platform],
        None => SharePlatform::ALL.to_vec(),
    };
    for platform in platforms {
        if let Some(url) = panel.share_url(platform) {
            println!("{:<10} {}", platform, url);
        }
    }

    panel.teardown();
    Ok(())
}

fn show_rewards(tab: RewardTab) {
    let mut panel = RedeemPanel::default();
    panel.select_tab(tab);

    let counts = panel.counts();
    let tabs: Vec<String> = RewardTab::ALL
        .iter()
        .map(|t| {
            let marker = if *t == panel.active_tab() { "*" } else { " " };
            format!("{}{} ({})", marker, t.label(), counts.get(*t))
        })
        .collect();
    println!("{}", tabs.join("  "));

    if let Some(message) = panel.empty_message() {
        println!("{}", message);
        return;
    }

    for reward in panel.visible() {
        println!(
            "[{:>2}] {:<32} {:>12}  {}",
            reward.id,
            reward.title,
            reward.cost_label(),
            reward.action_label()
        );
    }
}

async fn show_history(
    backend: Arc<dyn RewardsBackend>,
    session: Arc<SessionProvider>,
    limit: u32,
) -> anyhow::Result<()> {
    let dashboard = DashboardController::new(backend, session);
    let rows = dashboard.load_history(limit).await?;

    if rows.is_empty() {
        println!("No points activity yet");
    }
    for row in rows {
        println!(
            "{:<25} {:>7}  {}",
            row.created_at.as_deref().unwrap_or("-"),
            row.signed_points(),
            row.description
                .as_deref()
                .or(row.transaction_type.as_deref())
                .unwrap_or("")
        );
    }

    dashboard.teardown();
    Ok(())
}
