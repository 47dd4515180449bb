//! Style preset store and vector mixing.
//!
//! Each preset is a packed float32 array of shape `(511, 1, 256)`: 511
//! rate-indexed conditioning vectors of 256 dimensions. Presets load once at
//! startup and are read-only afterwards. Mixing blends several presets into
//! one vector for a single synthesis request.

use std::collections::HashMap;
use std::path::Path;

use crate::error::{Error, Result};
use crate::npy::{load_npy, load_npz, NpyArray};

/// Dimensions of one style vector.
pub const STYLE_DIM: usize = 256;

/// Number of selectable rate-indexed vectors per preset.
pub const STYLE_ROWS: usize = 511;

/// The known preset names, in their fixed order.
pub const PRESET_NAMES: [&str; 11] = [
    "af",
    "af_bella",
    "af_nicole",
    "af_sarah",
    "af_sky",
    "am_adam",
    "am_michael",
    "bf_emma",
    "bf_isabella",
    "bm_george",
    "bm_lewis",
];

/// In-memory store of named preset arrays, flat `(511 * 256)` per name.
pub struct StyleStore {
    presets: HashMap<String, Vec<f32>>,
}

impl StyleStore {
    /// Load `<name>.npy` for every known preset in `dir`.
    ///
    /// A missing preset file is logged and skipped — requesting it later
    /// fails with [`Error::ResourceNotFound`]. A present-but-misshapen file
    /// is an error.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let mut presets = HashMap::new();
        for name in PRESET_NAMES {
            let path = dir.join(format!("{name}.npy"));
            if !path.exists() {
                tracing::warn!(preset = name, path = %path.display(), "style preset missing, skipping");
                continue;
            }
            presets.insert(name.to_string(), validate(name, load_npy(&path)?)?);
        }
        tracing::info!(presets = presets.len(), "style presets loaded");
        Ok(Self { presets })
    }

    /// Load every preset from one NPZ bundle (member name = preset name).
    pub fn from_npz(path: &Path) -> Result<Self> {
        Self::from_arrays(load_npz(path)?)
    }

    /// Build a store from already-decoded arrays. This is the seam for
    /// callers that fetch resource bytes through their own asset mechanism.
    pub fn from_arrays(arrays: HashMap<String, NpyArray>) -> Result<Self> {
        let mut presets = HashMap::new();
        for (name, array) in arrays {
            let data = validate(&name, array)?;
            presets.insert(name, data);
        }
        Ok(Self { presets })
    }

    /// Loaded preset names, in the fixed [`PRESET_NAMES`] order.
    pub fn names(&self) -> Vec<&str> {
        PRESET_NAMES
            .iter()
            .copied()
            .filter(|name| self.presets.contains_key(*name))
            .collect()
    }

    /// The 256-float style vector for `name` at the given rate index.
    pub fn get_style_vector(&self, name: &str, index: usize) -> Result<&[f32]> {
        let data = self
            .presets
            .get(name)
            .ok_or_else(|| Error::ResourceNotFound(format!("style preset '{name}'")))?;
        if index >= STYLE_ROWS {
            return Err(Error::Range { index, limit: STYLE_ROWS });
        }
        Ok(&data[index * STYLE_DIM..(index + 1) * STYLE_DIM])
    }
}

fn validate(name: &str, array: NpyArray) -> Result<Vec<f32>> {
    if array.shape != [STYLE_ROWS, 1, STYLE_DIM] {
        return Err(Error::ShapeValidation(format!(
            "style preset '{name}' has shape {:?}, expected ({STYLE_ROWS}, 1, {STYLE_DIM})",
            array.shape
        )));
    }
    // The NPY parser guarantees shape × data agreement, but `from_arrays`
    // also accepts hand-built arrays; check the data actually fills the
    // declared shape so indexing can never slice out of bounds.
    if array.data.len() != STYLE_ROWS * STYLE_DIM {
        return Err(Error::ShapeValidation(format!(
            "style preset '{name}' has {} values, expected {}",
            array.data.len(),
            STYLE_ROWS * STYLE_DIM
        )));
    }
    Ok(array.data)
}

// ─────────────────────────────────────────────────────────────────────────────
// Mixing
// ─────────────────────────────────────────────────────────────────────────────

/// How preset vectors are blended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpolationMode {
    /// Weighted arithmetic mean of the raw vectors.
    Linear,
    /// Weighted sum of L2-normalized vectors. This is *not* geodesic slerp —
    /// the arithmetic is kept exactly as the model's tooling computes it,
    /// misleading name and all.
    Spherical,
}

/// Blend the index-0 vectors of the named presets into one style vector.
///
/// Weights are normalized by their sum over `names`; the output is never
/// renormalized. Fails with a precondition error when `names` is empty, a
/// name has no weight, or the weights sum to zero (which would otherwise
/// silently produce NaN).
pub fn mix(
    store: &StyleStore,
    names: &[&str],
    weights: &HashMap<String, f32>,
    mode: InterpolationMode,
) -> Result<Vec<f32>> {
    if names.is_empty() {
        return Err(Error::Precondition("at least one style must be selected".into()));
    }

    let mut selected = Vec::with_capacity(names.len());
    for &name in names {
        let weight = weights
            .get(name)
            .copied()
            .ok_or_else(|| Error::Precondition(format!("style '{name}' has no weight")))?;
        selected.push((name, weight));
    }

    let total: f32 = selected.iter().map(|(_, w)| w).sum();
    if total == 0.0 || !total.is_finite() {
        return Err(Error::Precondition(
            "style weights must sum to a non-zero finite value".into(),
        ));
    }

    let mut blended = vec![0.0f32; STYLE_DIM];
    for (name, weight) in selected {
        let vector = store.get_style_vector(name, 0)?;
        let normalized_weight = weight / total;
        match mode {
            InterpolationMode::Linear => {
                for (out, &v) in blended.iter_mut().zip(vector) {
                    *out += v * normalized_weight;
                }
            }
            InterpolationMode::Spherical => {
                let norm = vector.iter().map(|&v| (v as f64).powi(2)).sum::<f64>().sqrt();
                for (out, &v) in blended.iter_mut().zip(vector) {
                    *out += (v as f64 / norm) as f32 * normalized_weight;
                }
            }
        }
    }

    Ok(blended)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A store with two synthetic presets: af_sarah is all 2.0 with row 0
    /// starting 0,1,2,…; am_adam is all 4.0.
    fn test_store() -> StyleStore {
        let mut arrays = HashMap::new();

        let mut sarah = vec![2.0f32; STYLE_ROWS * STYLE_DIM];
        for (i, v) in sarah.iter_mut().take(STYLE_DIM).enumerate() {
            *v = i as f32;
        }
        arrays.insert(
            "af_sarah".to_string(),
            NpyArray { shape: vec![STYLE_ROWS, 1, STYLE_DIM], data: sarah },
        );
        arrays.insert(
            "am_adam".to_string(),
            NpyArray { shape: vec![STYLE_ROWS, 1, STYLE_DIM], data: vec![4.0; STYLE_ROWS * STYLE_DIM] },
        );

        StyleStore::from_arrays(arrays).unwrap()
    }

    fn weights(pairs: &[(&str, f32)]) -> HashMap<String, f32> {
        pairs.iter().map(|&(n, w)| (n.to_string(), w)).collect()
    }

    #[test]
    fn returns_first_row_at_index_zero() {
        let store = test_store();
        let v = store.get_style_vector("af_sarah", 0).unwrap();
        assert_eq!(v.len(), STYLE_DIM);
        assert_eq!(v[0], 0.0);
        assert_eq!(v[1], 1.0);
        assert_eq!(v[255], 255.0);
    }

    #[test]
    fn rejects_out_of_range_index() {
        let store = test_store();
        assert!(store.get_style_vector("af_sarah", 510).is_ok());
        assert!(matches!(
            store.get_style_vector("af_sarah", 511),
            Err(Error::Range { index: 511, limit: 511 })
        ));
    }

    #[test]
    fn unknown_preset_is_not_found() {
        let store = test_store();
        assert!(matches!(
            store.get_style_vector("bf_emma", 0),
            Err(Error::ResourceNotFound(_))
        ));
    }

    #[test]
    fn rejects_wrong_shape() {
        let mut arrays = HashMap::new();
        arrays.insert(
            "af".to_string(),
            NpyArray { shape: vec![510, 1, STYLE_DIM], data: vec![0.0; 510 * STYLE_DIM] },
        );
        assert!(matches!(
            StyleStore::from_arrays(arrays),
            Err(Error::ShapeValidation(_))
        ));
    }

    #[test]
    fn rejects_data_shorter_than_the_declared_shape() {
        let mut arrays = HashMap::new();
        arrays.insert(
            "af".to_string(),
            NpyArray { shape: vec![STYLE_ROWS, 1, STYLE_DIM], data: vec![0.0; 16] },
        );
        assert!(matches!(
            StyleStore::from_arrays(arrays),
            Err(Error::ShapeValidation(_))
        ));
    }

    #[test]
    fn names_follow_the_fixed_order() {
        let store = test_store();
        assert_eq!(store.names(), vec!["af_sarah", "am_adam"]);
    }

    #[test]
    fn single_preset_linear_mix_is_identity() {
        let store = test_store();
        let mixed = mix(&store, &["af_sarah"], &weights(&[("af_sarah", 1.0)]), InterpolationMode::Linear).unwrap();
        assert_eq!(mixed.as_slice(), store.get_style_vector("af_sarah", 0).unwrap());
    }

    #[test]
    fn single_preset_spherical_mix_is_the_unit_vector() {
        let store = test_store();
        let mixed = mix(&store, &["am_adam"], &weights(&[("am_adam", 1.0)]), InterpolationMode::Spherical).unwrap();
        let norm: f64 = mixed.iter().map(|&v| (v as f64).powi(2)).sum::<f64>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5, "norm was {norm}");
    }

    #[test]
    fn equal_linear_mix_is_the_arithmetic_mean() {
        let store = test_store();
        let mixed = mix(
            &store,
            &["af_sarah", "am_adam"],
            &weights(&[("af_sarah", 0.5), ("am_adam", 0.5)]),
            InterpolationMode::Linear,
        )
        .unwrap();
        let sarah = store.get_style_vector("af_sarah", 0).unwrap();
        for (i, &v) in mixed.iter().enumerate() {
            assert_eq!(v, (sarah[i] + 4.0) / 2.0);
        }
    }

    #[test]
    fn weight_normalisation_is_scale_invariant() {
        let store = test_store();
        let a = mix(
            &store,
            &["af_sarah", "am_adam"],
            &weights(&[("af_sarah", 0.5), ("am_adam", 0.5)]),
            InterpolationMode::Linear,
        )
        .unwrap();
        let b = mix(
            &store,
            &["af_sarah", "am_adam"],
            &weights(&[("af_sarah", 3.0), ("am_adam", 3.0)]),
            InterpolationMode::Linear,
        )
        .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn spherical_mix_magnitude_is_bounded_by_one() {
        let store = test_store();
        let mixed = mix(
            &store,
            &["af_sarah", "am_adam"],
            &weights(&[("af_sarah", 0.5), ("am_adam", 0.5)]),
            InterpolationMode::Spherical,
        )
        .unwrap();
        let norm: f64 = mixed.iter().map(|&v| (v as f64).powi(2)).sum::<f64>().sqrt();
        assert!(norm <= 1.0 + 1e-6, "norm was {norm}");
    }

    #[test]
    fn empty_selection_is_a_precondition_error() {
        let store = test_store();
        assert!(matches!(
            mix(&store, &[], &HashMap::new(), InterpolationMode::Linear),
            Err(Error::Precondition(_))
        ));
    }

    #[test]
    fn missing_weight_is_a_precondition_error() {
        let store = test_store();
        assert!(matches!(
            mix(&store, &["af_sarah"], &HashMap::new(), InterpolationMode::Linear),
            Err(Error::Precondition(_))
        ));
    }

    #[test]
    fn zero_weight_sum_is_a_precondition_error() {
        let store = test_store();
        assert!(matches!(
            mix(&store, &["af_sarah"], &weights(&[("af_sarah", 0.0)]), InterpolationMode::Linear),
            Err(Error::Precondition(_))
        ));
    }
}
