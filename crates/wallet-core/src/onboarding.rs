use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoreError;
use crate::types::{FeatureFlags, LoginAttempts};

/// Screens the bootstrap can route to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Screen {
    /// Start of onboarding (tutorial carousel).
    Onboarding,
    /// Terms of use.
    Terms,
    /// PIN creation.
    CreatePin,
    /// Wallet naming, only reachable when the feature is enabled.
    NameWallet,
    /// Biometry opt-in.
    UseBiometry,
    /// PIN entry for a fully onboarded wallet.
    EnterPin,
    /// Shown while a lockout penalty is active.
    AttemptLockout,
    /// The main application surface.
    Main,
}

impl Screen {
    /// Whether this screen belongs to the onboarding flow.
    pub fn is_onboarding(&self) -> bool {
        matches!(
            self,
            Self::Onboarding | Self::Terms | Self::CreatePin | Self::NameWallet | Self::UseBiometry
        )
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Onboarding => write!(f, "Onboarding"),
            Self::Terms => write!(f, "Terms"),
            Self::CreatePin => write!(f, "CreatePIN"),
            Self::NameWallet => write!(f, "NameWallet"),
            Self::UseBiometry => write!(f, "UseBiometry"),
            Self::EnterPin => write!(f, "EnterPIN"),
            Self::AttemptLockout => write!(f, "AttemptLockout"),
            Self::Main => write!(f, "Main"),
        }
    }
}

/// Onboarding milestones, in the order a user completes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Milestone {
    Tutorial,
    Terms,
    Pin,
    WalletName,
    Biometry,
}

impl Milestone {
    pub const ALL: [Milestone; 5] = [
        Self::Tutorial,
        Self::Terms,
        Self::Pin,
        Self::WalletName,
        Self::Biometry,
    ];
}

impl fmt::Display for Milestone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tutorial => write!(f, "tutorial"),
            Self::Terms => write!(f, "terms"),
            Self::Pin => write!(f, "pin"),
            Self::WalletName => write!(f, "wallet-name"),
            Self::Biometry => write!(f, "biometry"),
        }
    }
}

impl std::str::FromStr for Milestone {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.to_string() == s)
            .ok_or_else(|| CoreError::ValidationError(format!("unknown milestone: {}", s)))
    }
}

/// Persisted onboarding progress.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OnboardingState {
    pub did_complete_tutorial: bool,
    pub did_agree_to_terms: bool,
    #[serde(rename = "didCreatePIN")]
    pub did_create_pin: bool,
    pub did_name_wallet: bool,
    pub did_consider_biometry: bool,
}

impl OnboardingState {
    /// Record a milestone as reached.
    pub fn mark(&mut self, milestone: Milestone) {
        match milestone {
            Milestone::Tutorial => self.did_complete_tutorial = true,
            Milestone::Terms => self.did_agree_to_terms = true,
            Milestone::Pin => self.did_create_pin = true,
            Milestone::WalletName => self.did_name_wallet = true,
            Milestone::Biometry => self.did_consider_biometry = true,
        }
    }

    pub fn has(&self, milestone: Milestone) -> bool {
        match milestone {
            Milestone::Tutorial => self.did_complete_tutorial,
            Milestone::Terms => self.did_agree_to_terms,
            Milestone::Pin => self.did_create_pin,
            Milestone::WalletName => self.did_name_wallet,
            Milestone::Biometry => self.did_consider_biometry,
        }
    }

    /// Tutorial, terms and PIN are all done.
    fn core_steps_done(&self) -> bool {
        self.did_complete_tutorial && self.did_agree_to_terms && self.did_create_pin
    }

    /// Onboarding counts as complete once biometry was considered. Wallet
    /// naming is not required: wallets onboarded before naming existed are
    /// back-filled as named.
    pub fn is_complete(&self) -> bool {
        self.core_steps_done() && self.did_consider_biometry
    }
}

/// One entry of the resume chain: when `applies` holds, resume at `target`.
#[derive(Clone, Copy)]
pub struct ResumeRule {
    pub name: &'static str,
    pub target: Screen,
    pub applies: fn(&OnboardingState, FeatureFlags) -> bool,
}

impl fmt::Debug for ResumeRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResumeRule")
            .field("name", &self.name)
            .field("target", &self.target)
            .finish()
    }
}

/// Resume rules, evaluated top-down. The first matching rule wins; when
/// none match the user starts onboarding from the beginning.
pub const RESUME_RULES: &[ResumeRule] = &[
    ResumeRule {
        name: "consider-biometry",
        target: Screen::UseBiometry,
        applies: |s, flags| {
            s.core_steps_done()
                && (s.did_name_wallet || !flags.wallet_naming_enabled)
                && !s.did_consider_biometry
        },
    },
    ResumeRule {
        name: "name-wallet",
        target: Screen::NameWallet,
        applies: |s, flags| {
            s.core_steps_done() && flags.wallet_naming_enabled && !s.did_name_wallet
        },
    },
    ResumeRule {
        name: "create-pin",
        target: Screen::CreatePin,
        applies: |s, _| s.did_complete_tutorial && s.did_agree_to_terms && !s.did_create_pin,
    },
    ResumeRule {
        name: "agree-to-terms",
        target: Screen::Terms,
        applies: |s, _| s.did_complete_tutorial && !s.did_agree_to_terms,
    },
];

/// Everything the launch decision depends on.
#[derive(Debug, Clone, Default)]
pub struct LaunchContext {
    /// Stored onboarding progress; `None` on first launch.
    pub onboarding: Option<OnboardingState>,
    pub login_attempts: LoginAttempts,
    pub flags: FeatureFlags,
    /// Whether the user already authenticated in this app session.
    pub authenticated: bool,
}

/// Computes where the app resumes. All methods are pure.
pub struct OnboardingStateMachine;

impl OnboardingStateMachine {
    /// The onboarding step to resume at for a partially onboarded wallet.
    pub fn next_screen(state: &OnboardingState, flags: FeatureFlags) -> Screen {
        let target = RESUME_RULES
            .iter()
            .find(|rule| (rule.applies)(state, flags))
            .map(|rule| rule.target)
            .unwrap_or(Screen::Onboarding);

        tracing::debug!(screen = %target, "onboarding resume position");
        target
    }

    /// The screen to show at app start.
    pub fn launch_screen(ctx: &LaunchContext) -> Screen {
        let Some(state) = ctx.onboarding.as_ref() else {
            return Screen::Onboarding;
        };

        if state.is_complete() {
            if ctx.login_attempts.is_locked_out() {
                Screen::AttemptLockout
            } else if ctx.authenticated {
                Screen::Main
            } else {
                Screen::EnterPin
            }
        } else {
            Self::next_screen(state, ctx.flags)
        }
    }
}
