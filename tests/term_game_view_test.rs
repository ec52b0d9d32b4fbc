use tui_well::core::{Session, Well, WellConfig};
use tui_well::term::{AnchorY, FrameBuffer, GameView, Rgb, Viewport};
use tui_well::types::{InputEvent, InputKind, PieceKind, FRAME_MS};

fn screen_text(fb: &FrameBuffer) -> String {
    let mut all = String::new();
    for y in 0..fb.height() {
        for x in 0..fb.width() {
            all.push(fb.get(x, y).unwrap().ch);
        }
        all.push('\n');
    }
    all
}

#[test]
fn term_view_renders_border_corners() {
    let session = Session::new(WellConfig::default(), 1);
    let view = GameView::default();

    // 10 cells x 2 columns, 22 rows, plus the border.
    let vp = Viewport::new(22, 24);
    let fb = view.render(&session, vp);

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 23).unwrap().ch, '└');
    assert_eq!(fb.get(21, 23).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_settled_cell_as_two_chars_wide() {
    let mut rows = vec![".........."; 22];
    rows[21] = "L.........";
    let text: String = rows.iter().map(|r| format!("{r}\n")).collect();
    let session = Session::with_well(Well::from_ascii(&text).unwrap(), 1);

    let view = GameView::default();
    let fb = view.render(&session, Viewport::new(22, 24));

    let (x0, y0) = (1, 1 + 21);
    assert_eq!(fb.get(x0, y0).unwrap().ch, '█');
    assert_eq!(fb.get(x0 + 1, y0).unwrap().ch, '█');
    assert_eq!(fb.get(x0 + 2, y0).unwrap().ch, '·');
}

#[test]
fn term_view_draws_active_piece_and_ghost() {
    let mut session = Session::new(WellConfig::default(), 1);
    session.start();
    let view = GameView::default().with_anchor_y(AnchorY::Top);
    let fb = view.render(&session, Viewport::new(22, 24));

    let text = screen_text(&fb);
    assert_eq!(text.matches('█').count(), 8);
    assert!(text.contains('░'));
}

#[test]
fn term_view_draws_next_panel_when_wide_enough() {
    let mut session = Session::new(WellConfig::default(), 1);
    session.start();

    let view = GameView::default();
    let fb = view.render(&session, Viewport::new(60, 24));
    let text = screen_text(&fb);
    assert!(text.contains("NEXT"));
    assert!(text.contains("PIECES"));

    let narrow = view.render(&session, Viewport::new(22, 24));
    assert!(!screen_text(&narrow).contains("NEXT"));
}

#[test]
fn term_view_tints_rows_while_clearing() {
    let mut rows = vec![".........."; 22];
    rows[21] = "IIII..IIII";
    let text: String = rows.iter().map(|r| format!("{r}\n")).collect();
    let mut well = Well::from_ascii(&text).unwrap();
    well.add_piece(PieceKind::O);
    let mut session = Session::with_well(well, 1);

    session.tick(&[InputEvent::press(InputKind::Up)], FRAME_MS);
    assert_eq!(session.well().pending_rows(), &[21]);

    let fb = GameView::default().render(&session, Viewport::new(22, 24));
    assert_eq!(fb.get(1, 22).unwrap().style.bg, Rgb::WHITE);
    assert_ne!(fb.get(1, 21).unwrap().style.bg, Rgb::WHITE);
}

#[test]
fn term_view_shows_game_over() {
    let rows: Vec<String> = (0..22)
        .map(|y| if y == 0 { "..........".into() } else { "ZZZZZZZZZ.".to_string() })
        .collect();
    let text: String = rows.iter().map(|r| format!("{r}\n")).collect();
    let mut session = Session::with_well(Well::from_ascii(&text).unwrap(), 1);
    session.start();
    assert!(session.is_game_over());

    let fb = GameView::default().render(&session, Viewport::new(40, 24));
    assert!(screen_text(&fb).contains("GAME OVER"));
}

#[test]
fn render_into_reuses_buffer_across_sizes() {
    let session = Session::new(WellConfig::default(), 3);
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);

    view.render_into(&session, Viewport::new(30, 24), &mut fb);
    assert_eq!((fb.width(), fb.height()), (30, 24));
    view.render_into(&session, Viewport::new(22, 24), &mut fb);
    assert_eq!((fb.width(), fb.height()), (22, 24));
}
