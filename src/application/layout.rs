// Cell placement on the dashboard grid
use crate::application::view_factory::create_view;
use crate::domain::dashboard::Cell;
use crate::domain::view::ViewKind;
use uuid::Uuid;

pub const GRID_COLUMNS: i32 = 12;
pub const ROW_HEIGHT_PX: i32 = 83;
const NEW_CELL_SIZE: i32 = 4;
const IN_VIEW_BUFFER_PX: i32 = 600;

/// Scroll state of the page hosting the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub scroll_top: i32,
    pub window_height: i32,
}

/// Zero-valued graph cell placed below every existing cell
pub fn new_cell(existing: &[Cell]) -> Cell {
    let view = create_view(ViewKind::Xy);
    Cell {
        i: Uuid::new_v4().to_string(),
        name: view.name.clone(),
        x: 0,
        y: existing.iter().map(Cell::bottom).max().unwrap_or(0),
        w: NEW_CELL_SIZE,
        h: NEW_CELL_SIZE,
        view_id: None,
        view: Some(view),
    }
}

/// Copy of `cell` with a fresh key, beside the original when the row has room
pub fn clone_cell(existing: &[Cell], cell: &Cell) -> Cell {
    let mut clone = Cell {
        i: Uuid::new_v4().to_string(),
        name: format!("{} (clone)", cell.name),
        x: cell.right(),
        ..cell.clone()
    };

    let fits_right = clone.right() <= GRID_COLUMNS
        && !existing.iter().any(|other| other.overlaps(&clone));
    if !fits_right {
        clone.x = cell.x;
        clone.y = cell.bottom();
    }
    clone
}

pub fn in_view(cell: &Cell, viewport: Viewport) -> bool {
    let cell_top = cell.y * ROW_HEIGHT_PX;
    let cell_bottom = cell.bottom() * ROW_HEIGHT_PX;
    let buffered_bottom = viewport.window_height + viewport.scroll_top + IN_VIEW_BUFFER_PX;
    let buffered_top = viewport.scroll_top - IN_VIEW_BUFFER_PX;

    cell_top < buffered_bottom && cell_bottom > buffered_top
}

/// Cells visible under the viewport reported by `viewport`
pub fn visible_cells<'a>(cells: &'a [Cell], viewport: impl Fn() -> Viewport) -> Vec<&'a Cell> {
    let viewport = viewport();
    cells.iter().filter(|c| in_view(c, viewport)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(i: &str, x: i32, y: i32, w: i32, h: i32) -> Cell {
        Cell {
            i: i.to_string(),
            name: i.to_string(),
            x,
            y,
            w,
            h,
            view_id: None,
            view: None,
        }
    }

    #[test]
    fn test_new_cell_goes_below() {
        let cells = vec![cell("a", 0, 0, 4, 4), cell("b", 4, 0, 4, 6)];
        let added = new_cell(&cells);
        assert_eq!((added.x, added.y, added.w, added.h), (0, 6, 4, 4));
        assert_eq!(added.view.as_ref().unwrap().kind(), ViewKind::Xy);
        assert!(cells.iter().all(|c| c.i != added.i));

        let first = new_cell(&[]);
        assert_eq!(first.y, 0);
    }

    #[test]
    fn test_new_cells_get_unique_keys() {
        assert_ne!(new_cell(&[]).i, new_cell(&[]).i);
    }

    #[test]
    fn test_clone_goes_right_when_room() {
        let cells = vec![cell("a", 0, 0, 4, 4)];
        let clone = clone_cell(&cells, &cells[0]);
        assert_eq!((clone.x, clone.y), (4, 0));
        assert_eq!(clone.name, "a (clone)");
        assert_ne!(clone.i, "a");
    }

    #[test]
    fn test_clone_goes_below_when_row_full() {
        let cells = vec![cell("a", 0, 0, 4, 4), cell("b", 4, 0, 8, 4)];
        let clone = clone_cell(&cells, &cells[0]);
        assert_eq!((clone.x, clone.y), (0, 4));

        let wide = vec![cell("w", 6, 2, 6, 3)];
        let clone = clone_cell(&wide, &wide[0]);
        assert_eq!((clone.x, clone.y), (6, 5));
    }

    #[test]
    fn test_in_view() {
        let viewport = Viewport {
            scroll_top: 0,
            window_height: 800,
        };
        assert!(in_view(&cell("top", 0, 0, 4, 4), viewport));
        // 17 rows is 1411px, past the 1400px buffered bottom
        assert!(!in_view(&cell("far", 0, 17, 4, 4), viewport));

        let scrolled = Viewport {
            scroll_top: 3000,
            window_height: 800,
        };
        assert!(!in_view(&cell("top", 0, 0, 4, 4), scrolled));
    }

    #[test]
    fn test_visible_cells_uses_injected_viewport() {
        let cells = vec![cell("a", 0, 0, 4, 4), cell("b", 0, 40, 4, 4)];
        let visible = visible_cells(&cells, || Viewport {
            scroll_top: 0,
            window_height: 600,
        });
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].i, "a");
    }
}
