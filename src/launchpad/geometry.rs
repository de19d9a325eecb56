use anyhow::{bail, Result};

pub const GRID_ROWS: u8 = 8;
pub const GRID_COLS: u8 = 8;

/// Largest id a MIDI data byte can carry.
const MAX_ID: u8 = 0x7F;

/// Note (or CC) number addressing one pad or button on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(pub u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Grid { row: u8, col: u8 },
    RowStop(u8),
    TransportToggle,
    StatusIndicator,
    Legend,
}

/// Raw device ids for every cell the performer knows about.
#[derive(Debug, Clone)]
pub struct Layout {
    pub grid: [[u8; GRID_COLS as usize]; GRID_ROWS as usize],
    pub row_stops: [u8; GRID_ROWS as usize],
    pub transport_toggle: u8,
    pub status_indicator: u8,
    pub legend: Vec<u8>,
}

impl Layout {
    /// Launchpad X in programmer mode. Row 0 is the top row of pads, the row
    /// stops are the arrows down the right-hand side, the transport toggle is
    /// "Capture MIDI" and the status indicator is the logo.
    pub fn launchpad_x() -> Self {
        let mut grid = [[0; GRID_COLS as usize]; GRID_ROWS as usize];
        let mut row_stops = [0; GRID_ROWS as usize];
        for (row, ids) in grid.iter_mut().enumerate() {
            let base = 0x51 - 10 * row as u8;
            for (col, id) in ids.iter_mut().enumerate() {
                *id = base + col as u8;
            }
            row_stops[row] = base + GRID_COLS;
        }

        Self {
            grid,
            row_stops,
            transport_toggle: 0x62,
            status_indicator: 0x63,
            legend: (0x5B..0x62).collect(),
        }
    }
}

/// Bidirectional map between device ids and what they mean to the performer.
///
/// Built once at startup and shared read-only by the input and render paths.
#[derive(Debug, Clone)]
pub struct GeometryMap {
    grid: [[CellId; GRID_COLS as usize]; GRID_ROWS as usize],
    row_stops: [CellId; GRID_ROWS as usize],
    transport_toggle: CellId,
    status_indicator: CellId,
    legend: Vec<CellId>,
    roles: [Option<Role>; MAX_ID as usize + 1],
}

impl GeometryMap {
    /// Fails if any id is repeated or does not fit in a MIDI data byte.
    pub fn new(layout: &Layout) -> Result<Self> {
        let mut roles = [None; MAX_ID as usize + 1];
        let mut claim = |id: u8, role: Role| -> Result<CellId> {
            if id > MAX_ID {
                bail!("{role:?} uses id {id:#04x}, which is not a valid MIDI data byte");
            }
            if let Some(existing) = roles[id as usize] {
                bail!("id {id:#04x} is assigned to both {existing:?} and {role:?}");
            }
            roles[id as usize] = Some(role);
            Ok(CellId(id))
        };

        let mut grid = [[CellId(0); GRID_COLS as usize]; GRID_ROWS as usize];
        for (row, ids) in layout.grid.iter().enumerate() {
            for (col, &id) in ids.iter().enumerate() {
                let role = Role::Grid {
                    row: row as u8,
                    col: col as u8,
                };
                grid[row][col] = claim(id, role)?;
            }
        }

        let mut row_stops = [CellId(0); GRID_ROWS as usize];
        for (row, &id) in layout.row_stops.iter().enumerate() {
            row_stops[row] = claim(id, Role::RowStop(row as u8))?;
        }

        let transport_toggle = claim(layout.transport_toggle, Role::TransportToggle)?;
        let status_indicator = claim(layout.status_indicator, Role::StatusIndicator)?;
        let legend = layout
            .legend
            .iter()
            .map(|&id| claim(id, Role::Legend))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            grid,
            row_stops,
            transport_toggle,
            status_indicator,
            legend,
            roles,
        })
    }

    pub fn launchpad_x() -> Result<Self> {
        Self::new(&Layout::launchpad_x())
    }

    /// Panics if `row` or `col` is outside the 8x8 grid.
    pub fn cell_at(&self, row: u8, col: u8) -> CellId {
        self.grid[row as usize][col as usize]
    }

    pub fn coord_of(&self, id: CellId) -> Option<(u8, u8)> {
        match self.role_of(id)? {
            Role::Grid { row, col } => Some((row, col)),
            _ => None,
        }
    }

    /// Panics if `row` is outside the grid.
    pub fn row_stop_at(&self, row: u8) -> CellId {
        self.row_stops[row as usize]
    }

    pub fn row_of_stop(&self, id: CellId) -> Option<u8> {
        match self.role_of(id)? {
            Role::RowStop(row) => Some(row),
            _ => None,
        }
    }

    pub fn transport_toggle_id(&self) -> CellId {
        self.transport_toggle
    }

    pub fn status_indicator_id(&self) -> CellId {
        self.status_indicator
    }

    /// Static buttons painted once at startup, in layout order.
    pub fn legend(&self) -> &[CellId] {
        &self.legend
    }

    pub fn role_of(&self, id: CellId) -> Option<Role> {
        self.roles.get(id.0 as usize).copied().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn grid_round_trips() {
        let geometry = GeometryMap::launchpad_x().unwrap();
        for row in 0..GRID_ROWS {
            for col in 0..GRID_COLS {
                let id = geometry.cell_at(row, col);
                assert_eq!(geometry.coord_of(id), Some((row, col)));
                assert_eq!(geometry.row_of_stop(id), None);
            }
        }
    }

    #[test]
    fn every_id_is_distinct() {
        let geometry = GeometryMap::launchpad_x().unwrap();
        let mut seen = HashSet::new();
        for row in 0..GRID_ROWS {
            for col in 0..GRID_COLS {
                assert!(seen.insert(geometry.cell_at(row, col)));
            }
            assert!(seen.insert(geometry.row_stop_at(row)));
        }
        assert!(seen.insert(geometry.transport_toggle_id()));
        assert!(seen.insert(geometry.status_indicator_id()));
        for &id in geometry.legend() {
            assert!(seen.insert(id));
        }
        assert_eq!(seen.len(), 64 + 8 + 2 + 7);
    }

    #[test]
    fn auxiliary_controls_have_no_coordinate() {
        let geometry = GeometryMap::launchpad_x().unwrap();
        for row in 0..GRID_ROWS {
            let id = geometry.row_stop_at(row);
            assert_eq!(geometry.coord_of(id), None);
            assert_eq!(geometry.row_of_stop(id), Some(row));
        }
        assert_eq!(geometry.coord_of(geometry.transport_toggle_id()), None);
        assert_eq!(geometry.coord_of(geometry.status_indicator_id()), None);
        assert_eq!(
            geometry.role_of(geometry.status_indicator_id()),
            Some(Role::StatusIndicator)
        );
    }

    #[test]
    fn launchpad_x_ids() {
        let geometry = GeometryMap::launchpad_x().unwrap();
        assert_eq!(geometry.cell_at(0, 0), CellId(0x51));
        assert_eq!(geometry.cell_at(0, 7), CellId(0x58));
        assert_eq!(geometry.cell_at(7, 0), CellId(0x0B));
        assert_eq!(geometry.cell_at(2, 3), CellId(0x3D + 3));
        assert_eq!(geometry.row_stop_at(0), CellId(0x59));
        assert_eq!(geometry.row_stop_at(5), CellId(0x27));
        assert_eq!(geometry.row_stop_at(7), CellId(0x13));
        assert_eq!(geometry.transport_toggle_id(), CellId(0x62));
        assert_eq!(geometry.status_indicator_id(), CellId(0x63));
        assert_eq!(geometry.role_of(CellId(0x00)), None);
        assert_eq!(geometry.role_of(CellId(0x7F)), None);
    }

    #[test]
    fn duplicate_id_is_rejected() {
        let mut layout = Layout::launchpad_x();
        layout.status_indicator = layout.grid[3][4];
        let err = GeometryMap::new(&layout).unwrap_err();
        assert!(err.to_string().contains("0x37"), "{err}");
    }

    #[test]
    fn id_outside_midi_range_is_rejected() {
        let mut layout = Layout::launchpad_x();
        layout.row_stops[2] = 0x80;
        assert!(GeometryMap::new(&layout).is_err());
    }
}
