use crate::cli::{actions::Action, commands};
use anyhow::Result;
use std::path::PathBuf;

pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    Ok(Action::Server {
        port: matches
            .get_one::<u16>(commands::ARG_PORT)
            .copied()
            .unwrap_or(8080),
        users: matches.get_one::<PathBuf>(commands::ARG_USERS).cloned(),
        reap_interval: matches
            .get_one::<u64>(commands::ARG_REAP_INTERVAL)
            .copied()
            .unwrap_or(60),
    })
}
