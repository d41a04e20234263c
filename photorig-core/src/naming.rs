//! Directory and image file naming
//!
//! Stack shots are saved as `{project}{nn}.{ext}` inside `{project}_{stack}`.
//! Shot numbers below 10 are padded to two digits; larger numbers are written
//! as is, so the hundredth shot is `shot100.jpg`. Test shots go to
//! `{test_dir}/testShot_{n}.{ext}`.

use core::fmt::{self, Write};

use photorig_hal::ImageFormat;

/// Longest relative path the rig produces
pub const MAX_PATH_LEN: usize = 96;

/// Relative image or directory path
pub type ImagePath = heapless::String<MAX_PATH_LEN>;

/// Name did not fit into an [`ImagePath`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NameError;

impl fmt::Display for NameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "path longer than {} bytes", MAX_PATH_LEN)
    }
}

fn format_path(args: fmt::Arguments<'_>) -> Result<ImagePath, NameError> {
    let mut path = ImagePath::new();
    path.write_fmt(args).map_err(|_| NameError)?;
    Ok(path)
}

/// Directory for one stack, e.g. `shot_3`
pub fn stack_dir_name(project: &str, stack: u32) -> Result<ImagePath, NameError> {
    format_path(format_args!("{}_{}", project, stack))
}

/// File name for a stack shot, e.g. `shot07.jpg` or `shot12.jpg`
pub fn stack_shot_file_name(
    project: &str,
    shot: u32,
    format: ImageFormat,
) -> Result<ImagePath, NameError> {
    if shot < 10 {
        format_path(format_args!("{}{:02}.{}", project, shot, format.extension()))
    } else {
        format_path(format_args!("{}{}.{}", project, shot, format.extension()))
    }
}

/// File name for a test shot, e.g. `testShot_4.jpg`
pub fn test_shot_file_name(number: u32, format: ImageFormat) -> Result<ImagePath, NameError> {
    format_path(format_args!("testShot_{}.{}", number, format.extension()))
}

/// Join a directory and a file name with `/`
pub fn join(dir: &str, file: &str) -> Result<ImagePath, NameError> {
    if dir.is_empty() {
        return format_path(format_args!("{}", file));
    }
    format_path(format_args!("{}/{}", dir.trim_end_matches('/'), file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stack_shot_padding() {
        let jpg = ImageFormat::Jpeg;
        assert_eq!(stack_shot_file_name("shot", 7, jpg).unwrap(), "shot07.jpg");
        assert_eq!(stack_shot_file_name("shot", 12, jpg).unwrap(), "shot12.jpg");
        assert_eq!(stack_shot_file_name("shot", 1, jpg).unwrap(), "shot01.jpg");
        assert_eq!(stack_shot_file_name("shot", 100, jpg).unwrap(), "shot100.jpg");
        assert_eq!(
            stack_shot_file_name("beetle", 3, ImageFormat::Png).unwrap(),
            "beetle03.png"
        );
    }

    #[test]
    fn test_stack_dir_name() {
        assert_eq!(stack_dir_name("shot", 1).unwrap(), "shot_1");
        assert_eq!(stack_dir_name("beetle", 72).unwrap(), "beetle_72");
    }

    #[test]
    fn test_test_shot_file_name() {
        assert_eq!(
            test_shot_file_name(4, ImageFormat::Jpeg).unwrap(),
            "testShot_4.jpg"
        );
    }

    #[test]
    fn test_join() {
        assert_eq!(join("shot_1", "shot01.jpg").unwrap(), "shot_1/shot01.jpg");
        assert_eq!(join("testShots/", "testShot_1.jpg").unwrap(), "testShots/testShot_1.jpg");
        assert_eq!(join("", "a.jpg").unwrap(), "a.jpg");
    }

    #[test]
    fn test_overlong_name_rejected() {
        let long = "x".repeat(MAX_PATH_LEN);
        assert_eq!(stack_dir_name(&long, 1), Err(NameError));
    }
}
