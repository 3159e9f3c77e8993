use tui_2048::core::{Board, GameConfig, GameState, ScriptedRng};
use tui_2048::store::{Settings, Skin, SkinCatalog};
use tui_2048::term::{encode_frame, AnchorY, AnimationPlayer, GameView, Rgb, ViewOptions, Viewport};
use tui_2048::types::Direction;

fn opts<'a>(skin: &'a Skin, settings: &'a Settings) -> ViewOptions<'a> {
    ViewOptions {
        skin,
        settings,
        animation: None,
        show_win_banner: false,
    }
}

#[test]
fn term_view_fits_board_and_panel_in_default_terminal() {
    let view = GameView::default();
    let (w, h) = view.board_extent(4);
    // 4 tiles of 7x3 plus grid lines.
    assert_eq!((w, h), (33, 17));
    assert!(w < 80 && h < 24);
}

#[test]
fn term_view_draws_side_panel_values() {
    let mut snap = GameState::new(1).snapshot();
    snap.score = 1234;
    let skin = Skin::dark();
    let settings = Settings {
        animation_speed: 7,
        total_wins: 3,
        ..Settings::default()
    };

    let fb = GameView::default().render(&snap, &opts(&skin, &settings), Viewport::new(80, 24));
    let text = fb.text();
    for needle in ["SCORE", "1234", "SKIN", "Dark", "SPEED", "WINS"] {
        assert!(text.contains(needle), "missing {needle}:\n{text}");
    }
}

#[test]
fn term_view_places_top_left_tile_inside_grid() {
    let board = Board::from_array([[8, 0, 0, 0], [0; 4], [0; 4], [0; 4]]).unwrap();
    let snap = GameState::with_board(GameConfig::default(), board, ScriptedRng::new([0u32]))
        .unwrap()
        .snapshot();
    let skin = Skin::classic();
    let settings = Settings::default();
    let view = GameView::default().with_anchor_y(AnchorY::Top);

    // Narrow viewport: no room for the panel offset, board starts at x=0.
    let (w, h) = view.board_extent(4);
    let fb = view.render(&snap, &opts(&skin, &settings), Viewport::new(w, h));

    let grid = Rgb::from_hex(&skin.grid_color).unwrap();
    assert_eq!(fb.get(0, 0).unwrap().style.bg, grid);
    assert_eq!(fb.get(1, 1).unwrap().style.bg, Rgb::from_hex("#F2B179").unwrap());
    // Value centred on the middle row of the tile.
    assert_eq!(fb.row_text(2).trim_start().chars().next(), Some('8'));
}

#[test]
fn term_view_larger_boards_render() {
    let config = GameConfig {
        size: 6,
        ..GameConfig::default()
    };
    let snap = GameState::with_config(config, ScriptedRng::new([0u32, 0]))
        .unwrap()
        .snapshot();
    let skin = Skin::classic();
    let settings = Settings::default();
    let fb = GameView::default().render(&snap, &opts(&skin, &settings), Viewport::new(120, 40));
    assert_eq!(fb.width(), 120);
    assert!(fb.text().contains('2'));
}

#[test]
fn term_view_animation_frames_differ_then_settle() {
    let mut state = GameState::with_board(
        GameConfig::default(),
        Board::from_array([[0, 0, 0, 2], [0; 4], [0; 4], [0; 4]]).unwrap(),
        ScriptedRng::new([0u32, 0]),
    )
    .unwrap();
    assert!(state.apply_move(Direction::Left).moved);
    let snap = state.snapshot();

    let skin = Skin::classic();
    let settings = Settings::default();
    let view = GameView::default();
    let vp = Viewport::new(80, 24);

    let mut anim = AnimationPlayer::new(settings.animation_speed);
    anim.start(state.last_move_events());
    let animated = |anim: &AnimationPlayer| {
        let o = ViewOptions {
            animation: Some(anim),
            ..opts(&skin, &settings)
        };
        view.render(&snap, &o, vp)
    };

    let first = animated(&anim);
    while anim.tick() {}
    let settled = animated(&anim);
    let plain = view.render(&snap, &opts(&skin, &settings), vp);

    assert_ne!(first, settled);
    assert_eq!(settled, plain);
}

#[test]
fn term_view_every_builtin_skin_renders() {
    let snap = GameState::new(3).snapshot();
    let settings = Settings::default();
    let catalog = SkinCatalog::builtin();
    for name in catalog.names() {
        let skin = catalog.get(name);
        let fb = GameView::default().render(&snap, &opts(skin, &settings), Viewport::new(80, 24));
        assert!(fb.text().contains(name));
    }
}

#[test]
fn term_renderer_diff_is_small_for_one_tile_change() {
    let skin = Skin::classic();
    let settings = Settings::default();
    let view = GameView::default();
    let vp = Viewport::new(80, 24);

    let mut state = GameState::with_board(
        GameConfig::default(),
        Board::from_array([[2, 0, 0, 0], [0; 4], [0; 4], [0; 4]]).unwrap(),
        ScriptedRng::new([0u32, 0]),
    )
    .unwrap();
    let before = view.render(&state.snapshot(), &opts(&skin, &settings), vp);
    state.apply_move(Direction::Right);
    let after = view.render(&state.snapshot(), &opts(&skin, &settings), vp);

    let mut full = Vec::new();
    encode_frame(None, &after, &mut full).unwrap();
    let mut diff = Vec::new();
    encode_frame(Some(&before), &after, &mut diff).unwrap();
    assert!(!diff.is_empty());
    assert!(diff.len() < full.len());
}
