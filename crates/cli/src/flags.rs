use clap::ValueEnum;
use sensebank_protocol::Mode;

#[derive(Copy, Clone, Debug, ValueEnum)]
pub(crate) enum ModeFlag {
    Open,
    Skeptic,
}

impl ModeFlag {
    pub(crate) const fn as_domain(self) -> Mode {
        match self {
            ModeFlag::Open => Mode::Open,
            ModeFlag::Skeptic => Mode::Skeptic,
        }
    }
}
