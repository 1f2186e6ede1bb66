use crate::build_info;
use crate::util::*;
use clap::Parser;
use std::path::PathBuf;

#[cfg(feature = "profile-with-puffin")]
use std::sync::Mutex;

#[cfg(feature = "profile-with-puffin")]
static PUFFIN_SERVER: Mutex<Option<puffin_http::Server>> = Mutex::new(None);

pub type DemoResult<T> = Result<T, Box<dyn std::error::Error>>;

fn positive(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

/// nshp 2D local causal filter demo
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Directory for output files, will be created.
    /// WARNING, if this Directory
    /// already exists, current contents will be removed.
    #[arg(short, long)]
    pub output_dir: Option<std::path::PathBuf>,

    /// Rows per task for the parallel forward filter.
    #[arg(short, long, default_value = "16")]
    pub chunk_size: usize,

    /// Impulses per axis.
    #[arg(short, long, default_value = "4")]
    pub impulses: usize,

    /// Field size, assume square
    #[arg(short, long, default_value = "256", value_parser = positive)]
    pub domain_size: usize,

    /// Smoothing radius in samples at the right edge of the field,
    /// it falls off linearly to a quarter of that at the left edge.
    #[arg(short, long, default_value = "8.0")]
    pub radius: f64,

    /// Write out images, WARNING: we do not check image size, so be reasonable.
    #[arg(short, long, requires("output_dir"))]
    pub write_images: bool,

    /// The number of threads to use.
    #[arg(short, long, default_value = "8")]
    pub threads: usize,

    /// Print build information and quit
    #[arg(long)]
    pub build_info: bool,
}

impl Args {
    pub fn cli_setup(name: &str) -> DemoResult<Self> {
        let args = Args::parse();

        if args.build_info {
            build_info::print_report(name);
            std::process::exit(0);
        }

        if let Some(output_dir) = &args.output_dir {
            let _ = std::fs::remove_dir_all(output_dir);
            std::fs::create_dir(output_dir)?;
        }

        #[cfg(feature = "profile-with-puffin")]
        {
            println!("Initializing profiling server:");
            let server_addr =
                format!("127.0.0.1:{}", puffin_http::DEFAULT_PORT);
            println!(
                "Run this to view profiling data:  puffin_viewer {server_addr}"
            );
            let server = puffin_http::Server::new(&server_addr)?;
            std::thread::sleep(std::time::Duration::from_secs(2));
            profiling::puffin::set_scopes_on(true);
            profiling::finish_frame!();
            println!("t: {}", server.num_clients());
            if let Ok(mut lock) = PUFFIN_SERVER.lock() {
                *lock = Some(server);
            }
        }

        rayon::ThreadPoolBuilder::new()
            .num_threads(args.threads)
            .thread_name(|i| format!("rayon_thread_{}", i))
            .build_global()?;

        Ok(args)
    }

    pub fn shape(&self) -> Shape<2> {
        vector![self.domain_size, self.domain_size]
    }

    /// Output path of frame `i`, `None` without an output directory.
    pub fn frame_name(&self, i: usize) -> Option<PathBuf> {
        let mut result = self.output_dir.as_ref()?.clone();
        result.push(format!("frame_{:04}.png", i));
        Some(result)
    }

    pub fn finish(&self) {
        #[cfg(feature = "profile-with-puffin")]
        {
            println!("Flushing profiler");

            // Dropping the server flushes the profiling data.
            if let Ok(mut lock) = PUFFIN_SERVER.lock() {
                lock.take();
            }
        }
    }
}
