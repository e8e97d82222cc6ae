//! Main window
//!
//! [`XDashApp`] is a thin eframe shell around the [`Launcher`]: it forwards
//! keyboard and mouse input, ticks the launcher once per frame and draws its
//! state. Widget callbacks only record a [`UiAction`]; actions are applied
//! after the frame is laid out.

use egui::{Align, Color32, Key, Layout, Modifiers, RichText, TextureHandle, Vec2};
use image::RgbaImage;
use std::time::Instant;
use tracing::{debug, info, warn};

use super::icon;
use super::theme;
use crate::content::LayoutWatcher;
use crate::input::LogicalControl;
use crate::launcher::{FocusTarget, Launcher, Notice};
use crate::process::LaunchMode;

const BUTTON_SIZE: Vec2 = Vec2::new(280.0, 56.0);
const SELECTOR_WIDTH: f32 = 600.0;

/// Something the user did this frame
#[derive(Debug, Clone, PartialEq, Eq)]
enum UiAction {
    Control(LogicalControl),
    Focus(FocusTarget),
    Select(String),
    Launch,
    SetDefault,
    SetNetplay(bool),
    Retry,
    DismissNotice,
    Close,
}

/// Map a pressed key to the control it stands for
fn key_control(key: Key) -> Option<LogicalControl> {
    match key {
        Key::ArrowUp => Some(LogicalControl::Up),
        Key::ArrowDown => Some(LogicalControl::Down),
        Key::ArrowLeft => Some(LogicalControl::Left),
        Key::ArrowRight => Some(LogicalControl::Right),
        Key::Enter => Some(LogicalControl::Confirm),
        _ => None,
    }
}

const NAV_KEYS: [Key; 5] = [
    Key::ArrowUp,
    Key::ArrowDown,
    Key::ArrowLeft,
    Key::ArrowRight,
    Key::Enter,
];

/// Read navigation keys for this frame
///
/// Enter is consumed so a button holding egui keyboard focus does not also
/// treat it as a click.
fn keyboard_actions(ctx: &egui::Context, notice_open: bool) -> Vec<UiAction> {
    let mut actions = Vec::new();
    ctx.input_mut(|i| {
        for key in NAV_KEYS {
            let pressed = if key == Key::Enter {
                i.consume_key(Modifiers::NONE, key)
            } else {
                i.key_pressed(key)
            };
            if pressed {
                if let Some(control) = key_control(key) {
                    actions.push(UiAction::Control(control));
                }
            }
        }
        if i.key_pressed(Key::Escape) {
            // Escape closes an open notice before it closes the window
            if notice_open {
                actions.push(UiAction::DismissNotice);
            } else {
                actions.push(UiAction::Close);
            }
        }
    });
    actions
}

pub struct XDashApp {
    launcher: Launcher,
    watcher: Option<LayoutWatcher>,
    logo_image: RgbaImage,
    logo: Option<TextureHandle>,
}

impl XDashApp {
    pub fn new(launcher: Launcher, watcher: Option<LayoutWatcher>) -> Self {
        let logo_image = icon::logo_or_placeholder(&launcher.paths().icon_png());
        Self {
            launcher,
            watcher,
            logo_image,
            logo: None,
        }
    }

    fn apply(&mut self, ctx: &egui::Context, action: UiAction) {
        debug!("UI action: {:?}", action);
        match action {
            UiAction::Control(control) => self.launcher.handle_control(control),
            UiAction::Focus(target) => {
                self.launcher.focus_target(target);
            },
            UiAction::Select(name) => {
                self.launcher.focus_target(FocusTarget::ContentSelector);
                self.launcher.select(&name);
            },
            UiAction::Launch => {
                self.launcher.focus_target(FocusTarget::LaunchButton);
                let _ = self.launcher.launch_selected();
            },
            UiAction::SetDefault => {
                self.launcher.focus_target(FocusTarget::SetDefaultButton);
                self.launcher.set_default();
            },
            UiAction::SetNetplay(netplay) => {
                self.launcher.focus_target(FocusTarget::NetplayToggle);
                self.launcher.set_netplay(netplay);
            },
            UiAction::Retry => self.launcher.reload_content(),
            UiAction::DismissNotice => self.launcher.dismiss_notice(),
            UiAction::Close => {
                info!("Closing XDash");
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            },
        }
    }

    fn drain_layout_reloads(&mut self) {
        let Some(watcher) = self.watcher.as_mut() else {
            return;
        };
        while let Some(result) = watcher.try_next() {
            match &result {
                Ok(registry) => info!("Layout reloaded: {} entries", registry.len()),
                Err(e) => warn!("Layout reload failed: {}", e),
            }
            self.launcher.replace_content(result);
        }
    }

    fn logo_texture(&mut self, ctx: &egui::Context) -> egui::load::SizedTexture {
        let texture = self.logo.get_or_insert_with(|| {
            ctx.load_texture(
                "xdash-logo",
                icon::to_color_image(&self.logo_image),
                egui::TextureOptions::LINEAR,
            )
        });
        let size = icon::LOGO_SIZE as f32;
        egui::load::SizedTexture::new(texture.id(), Vec2::splat(size))
    }

    // ----- rendering -----

    fn render_header(&self, ui: &mut egui::Ui, logo: egui::load::SizedTexture) {
        theme::card_frame().show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.add(egui::Image::new(logo));
                ui.add_space(24.0);
                ui.vertical(|ui| {
                    ui.add_space(56.0);
                    ui.label(
                        RichText::new("XDash")
                            .size(36.0)
                            .strong()
                            .color(theme::TEXT_TITLE),
                    );
                    ui.label(
                        RichText::new("Manage your Xbox 360 Content with ease.")
                            .size(24.0)
                            .italics()
                            .color(theme::TEXT_TITLE),
                    );
                });
            });
        });
    }

    fn render_content(&self, ui: &mut egui::Ui, actions: &mut Vec<UiAction>) {
        let focus = self.launcher.focus();

        ui.label(
            RichText::new("Select Content")
                .size(26.0)
                .strong()
                .color(theme::TEXT_HEADING),
        );
        ui.add_space(16.0);

        let selected = self.launcher.selected().unwrap_or_default().to_string();
        let combo = egui::ComboBox::new("content_selector", "")
            .width(SELECTOR_WIDTH)
            .selected_text(RichText::new(&selected).size(16.0))
            .show_ui(ui, |ui| {
                for name in self.launcher.registry().names() {
                    let label = RichText::new(name).size(14.0);
                    if ui.selectable_label(name == selected, label).clicked() {
                        actions.push(UiAction::Select(name.to_string()));
                    }
                }
            });
        if combo.response.clicked() {
            actions.push(UiAction::Focus(FocusTarget::ContentSelector));
        }
        if focus.is_focused(FocusTarget::ContentSelector) {
            theme::draw_focus_ring(ui, combo.response.rect);
        }
        ui.add_space(24.0);

        ui.horizontal(|ui| {
            let launch = ui.add(
                egui::Button::new(
                    RichText::new("Launch Content")
                        .size(20.0)
                        .strong()
                        .color(Color32::WHITE),
                )
                .fill(theme::PRIMARY)
                .min_size(BUTTON_SIZE),
            );
            if launch.clicked() {
                actions.push(UiAction::Launch);
            }
            if focus.is_focused(FocusTarget::LaunchButton) {
                theme::draw_focus_ring(ui, launch.rect);
            }

            ui.add_space(16.0);

            let set_default = ui.add(
                egui::Button::new(
                    RichText::new("★ Set Default")
                        .size(14.0)
                        .strong()
                        .color(Color32::WHITE),
                )
                .fill(theme::SECONDARY)
                .min_size(Vec2::new(180.0, BUTTON_SIZE.y)),
            );
            if set_default.clicked() {
                actions.push(UiAction::SetDefault);
            }
            if focus.is_focused(FocusTarget::SetDefaultButton) {
                theme::draw_focus_ring(ui, set_default.rect);
            }
        });
        ui.add_space(24.0);

        let mut netplay = self.launcher.netplay();
        let toggle = ui.checkbox(
            &mut netplay,
            RichText::new("Enable Netplay Mode (Experimental)").size(16.0),
        );
        if toggle.changed() {
            actions.push(UiAction::SetNetplay(netplay));
        }
        if focus.is_focused(FocusTarget::NetplayToggle) {
            theme::draw_focus_ring(ui, toggle.rect);
        }
    }

    fn render_missing_content(&self, ui: &mut egui::Ui, actions: &mut Vec<UiAction>) {
        let paths = self.launcher.paths();
        let exe = self
            .launcher
            .supervisor()
            .executable(LaunchMode::Normal);

        ui.vertical_centered(|ui| {
            ui.label(
                RichText::new("⚠\nNO HDD CONTENT FOUND")
                    .size(24.0)
                    .strong()
                    .color(theme::TEXT_ERROR),
            );
            ui.add_space(16.0);

            if let Some(reason) = self.launcher.content_error() {
                ui.label(RichText::new(reason).size(12.0).color(theme::TEXT_STATUS));
                ui.add_space(8.0);
            }

            let instructions = format!(
                "Please ensure layout.json exists at:\n{}\n\n\
                 File should contain JSON in this format:\n\
                 {{\n  \"Content Name\": \"path/to/dash.xex\",\n  \
                 \"Another Content Name\": \"another/path.xex\"\n}}\n\n\
                 xenia_canary.exe location: {}",
                paths.layout_file.display(),
                exe.display()
            );
            ui.label(RichText::new(instructions).size(12.0).color(theme::TEXT_TITLE));
            ui.add_space(24.0);

            let retry = ui.add(
                egui::Button::new(
                    RichText::new("Retry Load")
                        .size(14.0)
                        .strong()
                        .color(Color32::WHITE),
                )
                .fill(theme::PRIMARY)
                .min_size(Vec2::new(200.0, 48.0)),
            );
            if retry.clicked() {
                actions.push(UiAction::Retry);
            }
            if self.launcher.focus().is_focused(FocusTarget::RetryButton) {
                theme::draw_focus_ring(ui, retry.rect);
            }
        });
    }

    fn render_status(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(
                RichText::new(self.launcher.controller_status())
                    .size(14.0)
                    .color(theme::TEXT_STATUS),
            );
            ui.add_space(32.0);
            ui.label(
                RichText::new(self.launcher.emulator_status())
                    .size(14.0)
                    .color(theme::TEXT_STATUS),
            );
        });
    }

    fn render_notice(ctx: &egui::Context, notice: &Notice, actions: &mut Vec<UiAction>) {
        egui::Window::new(RichText::new(&notice.title).strong())
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, Vec2::ZERO)
            .show(ctx, |ui| {
                ui.set_min_width(420.0);
                ui.label(RichText::new(&notice.message).size(14.0));
                ui.add_space(16.0);
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    let ok = ui.add(
                        egui::Button::new(RichText::new("OK").color(Color32::WHITE))
                            .fill(theme::PRIMARY)
                            .min_size(Vec2::new(96.0, 32.0)),
                    );
                    theme::draw_focus_ring(ui, ok.rect);
                    if ok.clicked() {
                        actions.push(UiAction::DismissNotice);
                    }
                });
            });
    }
}

impl eframe::App for XDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_layout_reloads();

        let mut actions = keyboard_actions(ctx, self.launcher.notice().is_some());

        let logo = self.logo_texture(ctx);

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(theme::BACKGROUND).inner_margin(48.0))
            .show(ctx, |ui| {
                self.render_header(ui, logo);
                ui.add_space(24.0);

                theme::card_frame().show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.set_min_height(560.0);
                    if self.launcher.has_content() {
                        self.render_content(ui, &mut actions);
                    } else {
                        self.render_missing_content(ui, &mut actions);
                    }
                });

                ui.add_space(16.0);
                self.render_status(ui);
            });

        if let Some(notice) = self.launcher.notice() {
            Self::render_notice(ctx, notice, &mut actions);
        }

        for action in actions {
            self.apply(ctx, action);
        }

        self.launcher.tick(Instant::now());

        // Keep ticking without user input
        ctx.request_repaint_after(self.launcher.next_wakeup());
    }
}
