//! Controller loop: buttons in, screens and shutter commands out.
//!
//! One [`Controller::tick`] runs the fixed per-tick sequence:
//!
//! 1. cycle press: move the highlight to the next slot
//! 2. activate press: run the highlighted slot's [`Action`]
//! 3. battery warning rising edge: "LOW BAT" alert
//! 4. idle timeout: deep sleep, after which no tick does anything
//! 5. sample the buttons for the next tick
//!
//! All hardware access goes through [`Surface`], [`Transport`] and
//! [`Board`], so the whole sequence runs on the host under test.

use embassy_futures::select::{select, Either};

use crate::command::{build_url, CommandOutcome, Transport};
use crate::config::{
    BUTTON_DEBOUNCE_MS, FEEDBACK_DWELL_MS, IDLE_TIMEOUT_MS, LOADING_STEP_MS, TARGET_SELECTOR_SLOT,
    TICK_MS, WIFI_CONNECT_TIMEOUT_MS,
};
use crate::error::Error;
use crate::menu::{Action, Menu};
use crate::net::{Credentials, Network};
use crate::power_logic::PowerMonitor;
use crate::target::{CommandVerb, Target, Targets};
use crate::ui::input_logic::{ButtonLatch, ButtonLevels};
use crate::ui::screens::draw_connecting;
use crate::ui::{Banner, LoadingDots, Surface};

/// Clock, buttons, battery flag, status LED and power switch.
#[allow(async_fn_in_trait)]
pub trait Board {
    /// Milliseconds since boot.
    fn now_ms(&self) -> u64;

    async fn delay_ms(&mut self, ms: u64);

    /// Raw button levels, `true` while held.
    fn read_buttons(&mut self) -> ButtonLevels;

    /// Battery warning currently active.
    fn battery_warning(&mut self) -> bool;

    /// Drive the status indicator output.
    fn set_indicator(&mut self, high: bool);

    /// Power down until a button wakes the device. Does not return on
    /// hardware.
    fn deep_sleep(&mut self);
}

/// Runtime tunables, built once at startup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Settings {
    pub tick_ms: u64,
    pub dwell_ms: u64,
    pub idle_timeout_ms: u64,
    pub debounce_ms: u64,
    pub loading_step_ms: u64,
    /// `None` waits for the network forever.
    pub connect_timeout_ms: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_ms: TICK_MS,
            dwell_ms: FEEDBACK_DWELL_MS,
            idle_timeout_ms: IDLE_TIMEOUT_MS,
            debounce_ms: BUTTON_DEBOUNCE_MS,
            loading_step_ms: LOADING_STEP_MS,
            connect_timeout_ms: Some(WIFI_CONNECT_TIMEOUT_MS),
        }
    }
}

/// Result of one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Tick {
    Continue,
    Asleep,
}

/// Join the network behind the "Connecting" screen.
///
/// The loading dots advance every `loading_step_ms` until the join
/// finishes or `connect_timeout_ms` elapses. On failure the "NO WIFI"
/// banner stays up for the dwell period and the board is put to sleep.
pub async fn associate<S, N, B>(
    surface: &mut S,
    network: &mut N,
    board: &mut B,
    credentials: &Credentials<'_>,
    settings: &Settings,
) -> Result<(), Error>
where
    S: Surface,
    N: Network,
    B: Board,
{
    info!("net: joining {}", credentials.ssid);
    draw_connecting(surface);
    let started = board.now_ms();

    let result = {
        let ticker = async {
            let mut dots = LoadingDots::new();
            loop {
                dots.advance(surface);
                board.delay_ms(settings.loading_step_ms).await;
                if let Some(timeout) = settings.connect_timeout_ms {
                    if board.now_ms().saturating_sub(started) >= timeout {
                        return;
                    }
                }
            }
        };

        match select(network.join(credentials), ticker).await {
            Either::First(Ok(())) => Ok(()),
            Either::First(Err(e)) => Err(Error::from(e)),
            Either::Second(()) => Err(Error::JoinTimeout),
        }
    };

    match result {
        Ok(()) => {
            info!("net: connected after {} ms", board.now_ms().saturating_sub(started));
            Ok(())
        }
        Err(e) => {
            error!("net: association failed: {:?}", e);
            Banner::NoNetwork.draw(surface);
            board.delay_ms(settings.dwell_ms).await;
            board.deep_sleep();
            Err(e)
        }
    }
}

/// Owns the menu, the shutter list and every collaborator.
pub struct Controller<S, T, B> {
    surface: S,
    transport: T,
    board: B,
    settings: Settings,
    menu: Menu,
    targets: Targets,
    power: PowerMonitor,
    buttons: ButtonLatch,
    asleep: bool,
}

impl<S, T, B> Controller<S, T, B>
where
    S: Surface,
    T: Transport,
    B: Board,
{
    /// Controller over the default shutter list, first shutter selected.
    pub fn new(surface: S, transport: T, board: B, settings: Settings) -> Self {
        Self::with_targets(surface, transport, board, settings, Targets::default())
    }

    pub fn with_targets(
        surface: S,
        transport: T,
        mut board: B,
        settings: Settings,
        targets: Targets,
    ) -> Self {
        let menu = Menu::new(targets.current().name());
        let power = PowerMonitor::new(
            board.now_ms(),
            board.battery_warning(),
            settings.idle_timeout_ms,
        );

        Self {
            surface,
            transport,
            board,
            settings,
            menu,
            targets,
            power,
            buttons: ButtonLatch::new(settings.debounce_ms),
            asleep: false,
        }
    }

    /// Draw the menu, restart the idle timer and take the first button
    /// sample.
    pub fn start(&mut self) {
        self.menu.render_all(&mut self.surface);
        let now = self.board.now_ms();
        self.power.activity(now);
        let levels = self.board.read_buttons();
        self.buttons.refresh(levels, now);
        info!("controller: started on {}", self.targets.current().name());
    }

    /// Start, then tick until the device goes to sleep.
    pub async fn run(&mut self) {
        self.start();
        while self.tick().await == Tick::Continue {
            self.board.delay_ms(self.settings.tick_ms).await;
        }
    }

    pub async fn tick(&mut self) -> Tick {
        if self.asleep {
            return Tick::Asleep;
        }

        let presses = self.buttons.take();

        if presses.cycle {
            let previous = self.menu.selected();
            self.menu.render(&mut self.surface, previous, false);
            let selected = self.menu.cycle_selection();
            self.menu.render(&mut self.surface, selected, true);
            debug!("menu: slot {}", selected);
            self.power.activity(self.board.now_ms());
        }

        if presses.activate {
            self.activate().await;
            self.power.activity(self.board.now_ms());
        }

        if self.power.battery_rising_edge(self.board.battery_warning()) {
            warn!("power: battery low");
            self.board.set_indicator(false);
            self.show_banner(Banner::LowBattery).await;
        }

        let now = self.board.now_ms();
        if self.power.idle_expired(now) {
            info!("power: idle for {} ms, sleeping", self.power.idle_ms(now));
            self.asleep = true;
            self.board.deep_sleep();
            return Tick::Asleep;
        }

        let levels = self.board.read_buttons();
        self.buttons.refresh(levels, now);
        Tick::Continue
    }

    async fn activate(&mut self) {
        match self.menu.current().action {
            Action::CycleTarget => self.cycle_target(),
            Action::Send(verb) => {
                self.send_command(verb).await;
            }
        }
    }

    /// Select the next shutter and repaint the selector slot.
    pub fn cycle_target(&mut self) {
        let name = self.targets.cycle().name();
        self.menu.set_target_label(name);
        self.menu.render(&mut self.surface, TARGET_SELECTOR_SLOT, true);
        info!("target: {}", name);
    }

    /// Send `verb` to the selected shutter and show the outcome.
    pub async fn send_command(&mut self, verb: CommandVerb) -> CommandOutcome {
        let url = build_url(self.targets.current().name(), verb);
        info!("command: GET {}", url.as_str());

        let outcome = CommandOutcome::from_response(self.transport.get(&url).await);
        match outcome {
            CommandOutcome::Delivered => info!("command: delivered"),
            CommandOutcome::Rejected(status) => warn!("command: rejected with {}", status),
            CommandOutcome::Failed(e) => warn!("command: failed: {:?}", e),
        }

        let banner = if outcome.is_delivered() {
            Banner::Success
        } else {
            Banner::Failure
        };
        self.show_banner(banner).await;
        outcome
    }

    /// Full-screen banner for the dwell period, then the menu again.
    async fn show_banner(&mut self, banner: Banner) {
        banner.draw(&mut self.surface);
        self.board.delay_ms(self.settings.dwell_ms).await;
        self.menu.render_all(&mut self.surface);
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    pub fn targets(&self) -> &Targets {
        &self.targets
    }

    /// Shutter that commands currently go to.
    pub fn current_target(&self) -> &Target {
        self.targets.current()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn board(&self) -> &B {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut B {
        &mut self.board
    }

    pub fn is_asleep(&self) -> bool {
        self.asleep
    }
}
