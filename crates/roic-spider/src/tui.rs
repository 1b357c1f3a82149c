use crate::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Progress over `len` categories; hidden unless `tui` is set.
pub(crate) fn category_progress(len: usize, tui: bool) -> Result<ProgressBar> {
    if !tui {
        return Ok(ProgressBar::hidden());
    }

    let pb = ProgressBar::new(len as u64).with_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.magenta} {msg:<18.white} |{bar:40.cyan/blue}| {pos}/{len} \
                [Time: {elapsed}, ETA: {eta}]",
            )?
            .progress_chars("## "),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}
