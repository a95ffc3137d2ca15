//! Stand-in for the game-state layer.
//!
//! Seeds the board with a handful of tokens and a ghost copy of the first,
//! then lets the user poke at it: Space toggles a ghost of the selected
//! token, N selects the next token, M steps it one cell east.

use bevy::prelude::*;
use hexx::Hex;

use crate::GameState;
use crate::pieces::{BoardItem, ItemsChanged};

/// Starting tokens: id, cell, color, side count.
const DEMO_PIECES: &[(&str, [i32; 2], &str, u32)] = &[
    ("red-king", [0, 0], "#d03030", 6),
    ("blue-knight", [2, -1], "#3050d0", 5),
    ("green-pawn", [-2, 1], "#30a050", 4),
    ("gold-tower", [1, 2], "#d0a020", 8),
];

/// Where a ghost sits relative to its source.
const GHOST_OFFSET: Hex = Hex::new(0, 1);

/// Look of the ghost copies.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct DemoConfig {
    /// Uniform scale of a ghost.
    pub ghost_scale: f32,
    /// Opacity of a ghost.
    pub ghost_alpha: f32,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            ghost_scale: 0.5,
            ghost_alpha: 0.3,
        }
    }
}

/// What the demo has put on the board so far.
#[derive(Resource, Default, Debug)]
pub struct DemoBoard {
    pieces: Vec<BoardItem>,
    ghost: Option<BoardItem>,
    selected: usize,
}

impl DemoBoard {
    /// The starting tokens plus a ghost of the first one.
    pub fn seed(&mut self, cfg: &DemoConfig) -> ItemsChanged {
        self.pieces = DEMO_PIECES
            .iter()
            .map(|&(id, [q, r], color, sides)| {
                BoardItem::piece(id, Hex::new(q, r), color).with_shape(0.6, sides)
            })
            .collect();
        self.selected = 0;
        self.ghost = None;

        let mut added = self.pieces.clone();
        if let Some(ghost) = self.ghost_of_selected(cfg) {
            added.push(ghost.clone());
            self.ghost = Some(ghost);
        }
        ItemsChanged {
            added,
            ..default()
        }
    }

    /// Removes the current ghost, or adds one for the selected token.
    pub fn toggle_ghost(&mut self, cfg: &DemoConfig) -> Option<ItemsChanged> {
        if let Some(ghost) = self.ghost.take() {
            return Some(ItemsChanged {
                removed: vec![ghost],
                ..default()
            });
        }
        let ghost = self.ghost_of_selected(cfg)?;
        self.ghost = Some(ghost.clone());
        Some(ItemsChanged {
            added: vec![ghost],
            ..default()
        })
    }

    /// Moves the selection to the next token.
    pub fn select_next(&mut self) {
        if !self.pieces.is_empty() {
            self.selected = (self.selected + 1) % self.pieces.len();
        }
    }

    /// Moves the selected token one cell east, taking its ghost along.
    pub fn step_selected(&mut self) -> Option<ItemsChanged> {
        let piece = self.pieces.get_mut(self.selected)?;
        piece.cell += Hex::new(1, 0);
        let mut updated = vec![piece.clone()];
        if let Some(ghost) = &mut self.ghost
            && ghost.clones_id.as_ref() == Some(&piece.id)
        {
            ghost.cell = piece.cell + GHOST_OFFSET;
            updated.push(ghost.clone());
        }
        Some(ItemsChanged {
            updated,
            ..default()
        })
    }

    /// The selected token, if any.
    pub fn selected(&self) -> Option<&BoardItem> {
        self.pieces.get(self.selected)
    }

    fn ghost_of_selected(&self, cfg: &DemoConfig) -> Option<BoardItem> {
        let source = self.selected()?;
        Some(
            BoardItem::clone_of(
                format!("{}-ghost", source.id),
                source.id.clone(),
                source.cell + GHOST_OFFSET,
            )
            .with_clone_scale(cfg.ghost_scale)
            .with_clone_alpha(cfg.ghost_alpha),
        )
    }
}

/// Demo game-state plugin.
pub struct DemoPlugin(pub DemoConfig);

impl Plugin for DemoPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<DemoConfig>()
            .insert_resource(self.0.clone())
            .init_resource::<DemoBoard>()
            .add_message::<ItemsChanged>()
            .add_systems(Startup, seed_board)
            .add_systems(Update, demo_input.run_if(in_state(GameState::Running)));
    }
}

fn seed_board(
    mut board: ResMut<DemoBoard>,
    cfg: Res<DemoConfig>,
    mut writer: MessageWriter<ItemsChanged>,
) {
    let batch = board.seed(&cfg);
    info!(items = batch.added.len(), "board seeded");
    writer.write(batch);
}

fn demo_input(
    keys: Res<ButtonInput<KeyCode>>,
    mut board: ResMut<DemoBoard>,
    cfg: Res<DemoConfig>,
    mut writer: MessageWriter<ItemsChanged>,
) {
    if keys.just_pressed(KeyCode::KeyN) {
        board.select_next();
        if let Some(piece) = board.selected() {
            debug!(id = %piece.id, "selected");
        }
    }
    if keys.just_pressed(KeyCode::Space)
        && let Some(batch) = board.toggle_ghost(&cfg)
    {
        writer.write(batch);
    }
    if keys.just_pressed(KeyCode::KeyM)
        && let Some(batch) = board.step_selected()
    {
        writer.write(batch);
    }
}
