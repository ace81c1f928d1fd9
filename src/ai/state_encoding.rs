use burn::prelude::*;
use burn::tensor::TensorData;

use crate::game::Cell;
use crate::training::Observation;

/// Number of planes produced per observation.
pub const CHANNELS: usize = 3;

/// Encode an observation as a tensor of shape [3, rows, columns]
/// (player-relative).
///
/// Channel 0: Player to move (1.0 where placed)
/// Channel 1: Opponent's stones (1.0 where placed)
/// Channel 2: Legal move mask (1.0 on every empty cell)
pub fn encode_observation<B: Backend>(observation: &Observation, device: &B::Device) -> Tensor<B, 3> {
    let data = encode_observation_flat(observation);
    Tensor::<B, 1>::from_data(TensorData::from(data.as_slice()), device).reshape([
        CHANNELS,
        observation.rows,
        observation.columns,
    ])
}

/// Encode observations of one board size as a tensor of shape
/// [batch, 3, rows, columns].
pub fn encode_observations_batch<B: Backend>(
    observations: &[Observation],
    device: &B::Device,
) -> Tensor<B, 4> {
    let (rows, columns) = observations
        .first()
        .map_or((0, 0), |obs| (obs.rows, obs.columns));
    let mut flat = Vec::with_capacity(observations.len() * CHANNELS * rows * columns);
    for observation in observations {
        debug_assert_eq!((observation.rows, observation.columns), (rows, columns));
        flat.extend_from_slice(&encode_observation_flat(observation));
    }
    Tensor::<B, 1>::from_data(TensorData::from(flat.as_slice()), device).reshape([
        observations.len(),
        CHANNELS,
        rows,
        columns,
    ])
}

/// Produce the flat [3 * rows * columns] f32 array for a single observation.
pub fn encode_observation_flat(observation: &Observation) -> Vec<f32> {
    let plane = observation.rows * observation.columns;
    let mut data = vec![0.0f32; CHANNELS * plane];
    let own = observation.turn.to_cell();
    let opponent = observation.turn.other().to_cell();

    for (idx, &cell) in observation.cells.iter().enumerate() {
        if cell == own {
            data[idx] = 1.0;
        } else if cell == opponent {
            data[plane + idx] = 1.0;
        } else if cell == Cell::Empty {
            data[2 * plane + idx] = 1.0;
        }
    }

    data
}
