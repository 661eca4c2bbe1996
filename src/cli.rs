mod ecoflow;
mod poll;
mod render;
mod show;
mod storage;

use clap::{Parser, Subcommand};

use self::{poll::PollArgs, render::RenderArgs, show::ShowArgs};
use crate::prelude::*;

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Main command: fetch one observation, append it, re-render the chart, and persist the series.
    Poll(Box<PollArgs>),

    /// Re-render the chart from the stored series without polling the device.
    Render(RenderArgs),

    /// Print the stored series.
    Show(ShowArgs),
}

impl Command {
    pub fn run(self) -> Result {
        match self {
            Self::Poll(args) => args.run().map(drop),
            Self::Render(args) => args.run(),
            Self::Show(args) => args.run(),
        }
    }
}
