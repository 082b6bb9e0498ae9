//! Batch math over particle snapshots.
//!
//! Flat buffers, no per-pair allocation; positions are read through the
//! safe-value rules and never written back.

use synapsis_data::Particle;

/// All pairwise Euclidean distances (upper triangle, i < j), in pair order.
pub fn pair_distances(particles: &[Particle]) -> Vec<f64> {
    let n = particles.len();
    let mut distances = Vec::with_capacity(n * n.saturating_sub(1) / 2);
    for i in 0..n {
        for j in (i + 1)..n {
            distances.push(particles[i].position.distance(&particles[j].position));
        }
    }
    distances
}

/// Full symmetric n×n distance matrix, row-major, zero diagonal.
pub fn distance_matrix(particles: &[Particle]) -> Vec<f64> {
    let n = particles.len();
    let mut matrix = vec![0.0; n * n];
    for i in 0..n {
        for j in (i + 1)..n {
            let d = particles[i].position.distance(&particles[j].position);
            matrix[i * n + j] = d;
            matrix[j * n + i] = d;
        }
    }
    matrix
}

/// Kinetic energy `0.5 * mass * |v|^2` per particle.
pub fn kinetic_energies(particles: &[Particle]) -> Vec<f64> {
    particles.iter().map(|p| p.kinetic_energy()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use synapsis_data::Vec3;
    use uuid::Uuid;

    fn at(x: f64, y: f64, z: f64) -> Particle {
        Particle {
            position: Vec3::new(x, y, z),
            ..Particle::new(Uuid::new_v4())
        }
    }

    #[test]
    fn pair_count_is_n_choose_2() {
        let particles: Vec<Particle> = (0..6).map(|i| at(i as f64, 0.0, 0.0)).collect();
        assert_eq!(pair_distances(&particles).len(), 15);
    }

    #[test]
    fn matrix_is_symmetric_with_zero_diagonal() {
        let particles = vec![at(0.0, 0.0, 0.0), at(3.0, 4.0, 0.0)];
        let m = distance_matrix(&particles);
        assert_eq!(m[0], 0.0);
        assert_eq!(m[3], 0.0);
        assert_eq!(m[1], 5.0);
        assert_eq!(m[2], 5.0);
    }

    #[test]
    fn kinetic_energy_batch() {
        let mut p = at(0.0, 0.0, 0.0);
        p.mass = 2.0;
        p.velocity = Vec3::new(1.0, 2.0, 2.0);
        assert_eq!(kinetic_energies(&[p]), vec![9.0]);
    }
}
