//! Main application for the five-in-a-row GUI

use std::collections::BTreeSet;
use std::time::Duration;

use eframe::egui;
use egui::{CentralPanel, Context, CornerRadius, Frame, RichText, SidePanel, TopBottomPanel, Vec2};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::storage::{self, SaveStore};
use crate::{Difficulty, EngineConfig, Stone};

use super::board_view::{BoardFrame, BoardStyle, BoardView, GridColor};
use super::game_state::{GameMode, GameState};
use super::theme::*;

/// Settings kept in eframe's storage between runs
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
struct Settings {
    difficulty: Difficulty,
    confirm_moves: bool,
    board_style: BoardStyle,
}

/// Rename in progress in the saves window
struct RenameEdit {
    id: u64,
    title: String,
}

/// Main five-in-a-row application
pub struct FiveInRowApp {
    state: GameState,
    board_view: BoardView,
    store: SaveStore,
    show_save_dialog: bool,
    save_title: String,
    show_saves: bool,
    selected_saves: BTreeSet<u64>,
    rename: Option<RenameEdit>,
}

impl FiveInRowApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let settings: Settings = cc
            .storage
            .and_then(|s| eframe::get_value(s, eframe::APP_KEY))
            .unwrap_or_default();

        let config = match storage::load_engine_config(&storage::data_dir()) {
            Ok(config) => config.unwrap_or_default(),
            Err(e) => {
                warn!(error = %e, "ignoring engine config override");
                EngineConfig::default()
            }
        };

        let store = SaveStore::open_default().unwrap_or_else(|e| {
            warn!(error = %e, "save list unreadable, starting empty");
            SaveStore::empty(storage::default_saves_path())
        });

        let mut state = GameState::new(GameMode::PvE, settings.difficulty, config);
        state.confirm_moves = settings.confirm_moves;
        info!(difficulty = settings.difficulty.label(), saves = store.games().len(), "app started");

        Self {
            state,
            board_view: BoardView {
                style: settings.board_style.clamped(),
                ..BoardView::default()
            },
            store,
            show_save_dialog: false,
            save_title: String::new(),
            show_saves: false,
            selected_saves: BTreeSet::new(),
            rename: None,
        }
    }

    fn render_board_style(&mut self, ui: &mut egui::Ui) {
        let style = &mut self.board_view.style;
        ui.label(RichText::new("Grid colour").color(TEXT_MUTED));
        for color in GridColor::ALL {
            ui.radio_value(&mut style.grid_color, color, color.label());
        }
        ui.separator();
        ui.add(egui::Slider::new(&mut style.line_width, BoardStyle::LINE_WIDTH_RANGE).text("Line width"));
        ui.add(egui::Slider::new(&mut style.padding, BoardStyle::PADDING_RANGE).text("Padding"));
        if ui.button("Reset").clicked() {
            *style = BoardStyle::default();
        }
    }

    fn render_menu_bar(&mut self, ctx: &Context) {
        TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("Game", |ui| {
                    if ui.button("New Game (vs Computer)").clicked() {
                        self.state.reset(GameMode::PvE);
                        ui.close_menu();
                    }
                    if ui.button("New Game (Two Players)").clicked() {
                        self.state.reset(GameMode::PvP);
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Save...").clicked() {
                        self.save_title.clear();
                        self.show_save_dialog = true;
                        ui.close_menu();
                    }
                    if ui.button("Saved Games...").clicked() {
                        self.show_saves = true;
                        ui.close_menu();
                    }
                });

                ui.menu_button("Settings", |ui| {
                    ui.label(RichText::new("Difficulty").color(TEXT_MUTED));
                    for level in Difficulty::ALL {
                        ui.radio_value(&mut self.state.difficulty, level, level.label());
                    }
                    ui.separator();
                    if ui.checkbox(&mut self.state.confirm_moves, "Confirm moves").changed()
                        && !self.state.confirm_moves
                    {
                        self.state.cancel_pending();
                    }
                    ui.separator();
                    ui.menu_button("Board", |ui| self.render_board_style(ui));
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let mode_text = match self.state.mode {
                        GameMode::PvE => format!("You: Black | Computer: {}", self.state.difficulty.label()),
                        GameMode::PvP => "Two players".to_string(),
                    };
                    ui.label(mode_text);
                });
            });
        });
    }

    fn render_side_panel(&mut self, ctx: &Context) {
        SidePanel::right("info_panel")
            .min_width(220.0)
            .max_width(260.0)
            .frame(Frame::new().fill(PANEL_BG).inner_margin(10.0))
            .show(ctx, |ui| {
                ui.add_space(8.0);
                ui.label(RichText::new("FIVE IN A ROW").size(20.0).strong().color(TEXT_PRIMARY));
                ui.add_space(12.0);

                self.render_turn_card(ui);

                if self.state.pending.is_some() {
                    ui.add_space(10.0);
                    self.render_pending_card(ui);
                }

                if self.state.mode.has_ai() {
                    ui.add_space(10.0);
                    self.render_ai_card(ui);
                }

                if let Some(result) = self.state.game_over.clone() {
                    ui.add_space(10.0);
                    Self::card_frame().show(ui, |ui| {
                        let text = match result.winner {
                            Some(Stone::Black) => "BLACK WINS",
                            Some(_) => "WHITE WINS",
                            None => "DRAW",
                        };
                        ui.label(RichText::new(text).size(18.0).strong().color(WIN_HIGHLIGHT));
                        if ui.button("New Game").clicked() {
                            self.state.reset(self.state.mode);
                        }
                    });
                }

                if let Some(msg) = &self.state.message {
                    ui.add_space(10.0);
                    ui.label(RichText::new(msg).size(11.0).color(STATUS_BUSY));
                }
            });
    }

    fn card_frame() -> Frame {
        Frame::new()
            .fill(CARD_BG)
            .corner_radius(CornerRadius::same(8))
            .inner_margin(12.0)
    }

    fn render_turn_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            let is_black = self.state.current_turn == Stone::Black;
            ui.horizontal(|ui| {
                let (rect, _) = ui.allocate_exact_size(Vec2::splat(36.0), egui::Sense::hover());
                let fill = if is_black { BLACK_STONE } else { WHITE_STONE };
                ui.painter().circle_filled(rect.center(), 16.0, fill);

                ui.add_space(8.0);
                ui.vertical(|ui| {
                    let name = if is_black { "BLACK" } else { "WHITE" };
                    ui.label(RichText::new(name).size(16.0).strong().color(TEXT_PRIMARY));

                    let (status, color) = if self.state.is_ai_thinking() {
                        ("Computer thinking...", STATUS_BUSY)
                    } else if self.state.game_over.is_some() {
                        ("Game over", WIN_HIGHLIGHT)
                    } else {
                        ("To move", STATUS_OK)
                    };
                    ui.label(RichText::new(status).size(12.0).color(color));
                });
            });
        });
    }

    fn render_pending_card(&mut self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("PENDING MOVE").size(10.0).color(TEXT_MUTED));
            ui.horizontal(|ui| {
                if ui.button("Confirm (Enter)").clicked() {
                    self.state.confirm_pending();
                }
                if ui.button("Cancel (Esc)").clicked() {
                    self.state.cancel_pending();
                }
            });
        });
    }

    fn render_ai_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("COMPUTER").size(10.0).color(TEXT_MUTED));
            ui.add_space(4.0);

            if let Some(elapsed) = self.state.ai_thinking_elapsed() {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(RichText::new(format!("{:.1}s", elapsed.as_secs_f32())).color(STATUS_BUSY));
                });
            } else if let Some(result) = &self.state.last_ai_result {
                ui.label(RichText::new(format!("{:?}", result.search_type)).size(11.0).strong().color(STATUS_OK));
                ui.label(
                    RichText::new(format!("score {} | {} nodes | {}ms", result.score, result.nodes, result.time_ms))
                        .size(10.0)
                        .color(TEXT_SECONDARY),
                );
            } else {
                ui.label(RichText::new("Waiting for your move").size(10.0).color(TEXT_SECONDARY));
            }
        });
    }

    fn render_board(&mut self, ctx: &Context) {
        CentralPanel::default().show(ctx, |ui| {
            let interactive = self.state.game_over.is_none() && self.state.is_human_turn() && !self.state.is_ai_thinking();
            let winning_line = self.state.game_over.as_ref().and_then(|r| r.winning_line.clone());

            let frame = BoardFrame {
                board: &self.state.board,
                current_turn: self.state.current_turn,
                last_move: self.state.last_move,
                pending: self.state.pending,
                winning_line: winning_line.as_deref(),
                interactive,
            };

            if let Some(pos) = self.board_view.show(ui, &frame) {
                if let Err(msg) = self.state.try_place_stone(pos) {
                    self.state.message = Some(msg);
                }
            }
        });
    }

    fn render_save_dialog(&mut self, ctx: &Context) {
        if !self.show_save_dialog {
            return;
        }

        let mut open = true;
        let mut done = false;
        egui::Window::new("Save game")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label("Title (empty uses the current time)");
                ui.text_edit_singleline(&mut self.save_title);
                if ui.button("Save").clicked() {
                    let snapshot = self.state.snapshot();
                    let ai_player = self.state.mode.has_ai();
                    if let Err(e) = self.store.save(&self.save_title, &snapshot, ai_player) {
                        warn!(error = %e, "save failed");
                        self.state.message = Some(format!("Save failed: {e}"));
                    }
                    done = true;
                }
            });

        self.show_save_dialog = open && !done;
    }

    fn render_saves_window(&mut self, ctx: &Context) {
        if !self.show_saves {
            return;
        }

        let mut open = true;
        let mut load = None;
        let mut delete = false;
        let mut commit_rename = false;

        egui::Window::new("Saved games")
            .open(&mut open)
            .default_width(360.0)
            .show(ctx, |ui| {
                if self.store.games().is_empty() {
                    ui.label(RichText::new("No saved games").color(TEXT_SECONDARY));
                }

                egui::ScrollArea::vertical().max_height(320.0).show(ui, |ui| {
                    for game in self.store.games() {
                        ui.horizontal(|ui| {
                            let mut selected = self.selected_saves.contains(&game.id);
                            if ui.checkbox(&mut selected, "").changed() {
                                if selected {
                                    self.selected_saves.insert(game.id);
                                } else {
                                    self.selected_saves.remove(&game.id);
                                }
                            }

                            let editing = matches!(&self.rename, Some(edit) if edit.id == game.id);
                            if let (true, Some(edit)) = (editing, self.rename.as_mut()) {
                                let response = ui.text_edit_singleline(&mut edit.title);
                                if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                                    commit_rename = true;
                                }
                                if ui.button("OK").clicked() {
                                    commit_rename = true;
                                }
                                return;
                            }

                            ui.vertical(|ui| {
                                let mode = if game.ai_player { "vs computer" } else { "two players" };
                                ui.label(RichText::new(&game.title).strong());
                                ui.label(
                                    RichText::new(format!("{} | {}", game.time_label(), mode))
                                        .size(10.0)
                                        .color(TEXT_MUTED),
                                );
                            });
                            if ui.button("Load").clicked() {
                                load = Some(game.id);
                            }
                            if ui.button("Rename").clicked() {
                                self.rename = Some(RenameEdit {
                                    id: game.id,
                                    title: game.title.clone(),
                                });
                            }
                        });
                    }
                });

                ui.separator();
                let label = format!("Delete selected ({})", self.selected_saves.len());
                if ui
                    .add_enabled(!self.selected_saves.is_empty(), egui::Button::new(label))
                    .clicked()
                {
                    delete = true;
                }
            });

        if commit_rename {
            if let Some(edit) = self.rename.take() {
                if let Err(e) = self.store.rename(edit.id, &edit.title) {
                    warn!(error = %e, "rename failed");
                }
            }
        }

        if delete {
            let ids: Vec<u64> = self.selected_saves.iter().copied().collect();
            match self.store.remove(&ids) {
                Ok(removed) => info!(removed, "saves deleted"),
                Err(e) => warn!(error = %e, "delete failed"),
            }
            self.selected_saves.clear();
        }

        if let Some(id) = load {
            self.state.load_from(&self.store, id);
            open = false;
        }

        self.show_saves = open;
        if !open {
            self.rename = None;
        }
    }

    fn handle_input(&mut self, ctx: &Context) {
        if ctx.wants_keyboard_input() {
            return;
        }
        ctx.input(|i| {
            if i.key_pressed(egui::Key::Enter) {
                self.state.confirm_pending();
            }
            if i.key_pressed(egui::Key::Escape) {
                self.state.cancel_pending();
            }
            if i.key_pressed(egui::Key::N) {
                self.state.reset(self.state.mode);
            }
        });
    }
}

impl eframe::App for FiveInRowApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.handle_input(ctx);
        self.state.check_ai_result();

        if self.state.is_ai_turn() && !self.state.is_ai_thinking() && self.state.game_over.is_none() {
            self.state.start_ai_thinking();
        }

        self.render_menu_bar(ctx);
        self.render_side_panel(ctx);
        self.render_board(ctx);
        self.render_save_dialog(ctx);
        self.render_saves_window(ctx);

        if self.state.is_ai_thinking() {
            ctx.request_repaint_after(Duration::from_millis(30));
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let settings = Settings {
            difficulty: self.state.difficulty,
            confirm_moves: self.state.confirm_moves,
            board_style: self.board_view.style,
        };
        eframe::set_value(storage, eframe::APP_KEY, &settings);
    }
}
