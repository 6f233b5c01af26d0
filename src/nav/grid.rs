use crate::nav::keys::GridKey;

/// Grid position as (row index, column index).
pub type Pos = (usize, usize);

/// Target of a navigation key from `pos` in a `rows` x `cols` grid. `None`
/// means the key is a no-op there (edges, empty grid, out-of-range origin).
pub fn step(key: GridKey, pos: Pos, rows: usize, cols: usize) -> Option<Pos> {
    let (r, c) = pos;
    if rows == 0 || cols == 0 || r >= rows || c >= cols {
        return None;
    }
    let last_r = rows - 1;
    let last_c = cols - 1;
    match key {
        GridKey::Up if r > 0 => Some((r - 1, c)),
        GridKey::Down if r < last_r => Some((r + 1, c)),
        GridKey::Left if c > 0 => Some((r, c - 1)),
        GridKey::Right if c < last_c => Some((r, c + 1)),
        GridKey::Tab => {
            if c < last_c {
                Some((r, c + 1))
            } else if r < last_r {
                Some((r + 1, 0))
            } else {
                None
            }
        }
        GridKey::BackTab => {
            if c > 0 {
                Some((r, c - 1))
            } else if r > 0 {
                Some((r - 1, last_c))
            } else {
                None
            }
        }
        _ => None,
    }
}

/// Keep `cursor` inside a window of `visible` items starting at `offset`.
pub fn scroll_into_view(offset: usize, cursor: usize, visible: usize) -> usize {
    if visible == 0 {
        return offset;
    }
    if cursor < offset {
        cursor
    } else if cursor >= offset + visible {
        cursor + 1 - visible
    } else {
        offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrows_stop_at_edges() {
        assert_eq!(step(GridKey::Up, (0, 1), 3, 3), None);
        assert_eq!(step(GridKey::Down, (2, 1), 3, 3), None);
        assert_eq!(step(GridKey::Left, (1, 0), 3, 3), None);
        assert_eq!(step(GridKey::Right, (1, 2), 3, 3), None);
        assert_eq!(step(GridKey::Down, (1, 1), 3, 3), Some((2, 1)));
        assert_eq!(step(GridKey::Left, (1, 1), 3, 3), Some((1, 0)));
    }

    #[test]
    fn tab_wraps_to_next_row() {
        // columns [A, B], rows [r0, r1]
        assert_eq!(step(GridKey::Tab, (0, 0), 2, 2), Some((0, 1)));
        assert_eq!(step(GridKey::Tab, (0, 1), 2, 2), Some((1, 0)));
        assert_eq!(step(GridKey::Tab, (1, 1), 2, 2), None);
    }

    #[test]
    fn back_tab_mirrors_tab() {
        assert_eq!(step(GridKey::BackTab, (1, 0), 2, 2), Some((0, 1)));
        assert_eq!(step(GridKey::BackTab, (1, 1), 2, 2), Some((1, 0)));
        assert_eq!(step(GridKey::BackTab, (0, 0), 2, 2), None);
    }

    #[test]
    fn empty_or_stale_grid_is_noop() {
        for k in [GridKey::Up, GridKey::Down, GridKey::Tab, GridKey::BackTab] {
            assert_eq!(step(k, (0, 0), 0, 3), None);
            assert_eq!(step(k, (0, 0), 3, 0), None);
            assert_eq!(step(k, (5, 0), 3, 3), None);
        }
    }

    #[test]
    fn scroll_window_follows_cursor() {
        assert_eq!(scroll_into_view(0, 3, 4), 0);
        assert_eq!(scroll_into_view(0, 4, 4), 1);
        assert_eq!(scroll_into_view(8, 2, 4), 2);
        assert_eq!(scroll_into_view(5, 9, 0), 5);
    }
}
