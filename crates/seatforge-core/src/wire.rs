use crate::error::{SeatingError, SfResult};
use crate::matrix::Matrix;
use crate::model::{GroupDimension, SeatingState};
use seatforge_protocol::WireState;

impl SeatingState {
    pub fn to_wire(&self) -> WireState {
        let dims = self.dimensions();
        WireState {
            names: self.names().to_vec(),
            group_names: dims.iter().map(|d| d.name.clone()).collect(),
            group_indexes: dims.iter().map(|d| [d.start, d.end]).collect(),
            group_weights: dims.iter().map(|d| d.weight).collect(),
            seating: self.seating().to_rows(),
            weights: self.weight_row().to_vec(),
            fixed: self.fixed().to_rows(),
            geometry: self.geometry().to_rows(),
        }
    }

    /// Rebuilds a state from its wire form. Geometry is taken as sent, then
    /// checked against the seating like every other invariant.
    pub fn from_wire(wire: WireState) -> SfResult<Self> {
        let groups = wire.group_names.len();
        if wire.group_indexes.len() != groups || wire.group_weights.len() != groups {
            return Err(SeatingError::Validation(format!(
                "{} group names, {} index pairs, {} weights",
                groups,
                wire.group_indexes.len(),
                wire.group_weights.len()
            )));
        }

        let dimensions = wire
            .group_names
            .into_iter()
            .zip(wire.group_indexes)
            .zip(wire.group_weights)
            .map(|((name, [start, end]), weight)| GroupDimension::new(name, start, end, weight))
            .collect();

        let columns = wire.weights.len();
        let persons = wire.names.len();
        let seating = Matrix::from_rows(&wire.seating, columns)?;
        let fixed = Matrix::from_rows(&wire.fixed, columns)?;
        let geometry = Matrix::from_rows(&wire.geometry, persons)?;

        SeatingState::from_parts(
            wire.names,
            dimensions,
            wire.weights,
            seating,
            fixed,
            geometry,
        )
    }

    pub fn to_json(&self) -> SfResult<String> {
        Ok(serde_json::to_string(&self.to_wire())?)
    }

    pub fn from_json(json: &str) -> SfResult<Self> {
        let wire: WireState = serde_json::from_str(json)?;
        Self::from_wire(wire)
    }
}
