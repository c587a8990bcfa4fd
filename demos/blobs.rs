use nscluster::data::{make_blobs, RunParams};
use nscluster::{jaccard, Kmeans, SpectralClustering};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG=debug shows the per-stage details.
    env_logger::init();

    // Small fixed run: 60 points around 4 centres in 2-D.
    let params = RunParams::new(60, 4, 2)?;
    let mut rng = StdRng::seed_from_u64(2024);
    let blobs = make_blobs(params.n, params.dim, params.k, &mut rng)?;

    let spectral = SpectralClustering::new().fit(&blobs.points)?;
    let kmeans = Kmeans::new(params.k).fit(&blobs.points)?;

    println!("n={} k={} dim={}", params.n, params.k, params.dim);
    println!(
        "spectral: k={} jaccard={:.3} (eigensolver settled: {})",
        spectral.k,
        jaccard(&blobs.centers, &spectral.labels),
        spectral.eigen_converged
    );
    println!(
        "k-means:  k={} jaccard={:.3} ({:?} after {} iterations)",
        params.k,
        jaccard(&blobs.centers, &kmeans.labels),
        kmeans.termination,
        kmeans.iterations
    );

    Ok(())
}
