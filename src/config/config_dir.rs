use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

use super::error::{ConfigError, ConfigResult};

/// Explicit config path, wins over every other location.
pub const CONFIG_PATH_ENV: &str = "ONLINECOURSE_CONFIG";

const LOCAL_CONFIG: &str = "./config.toml";

#[cfg(windows)]
const USER_DIR_ENV: &str = "APPDATA";
#[cfg(not(windows))]
const USER_DIR_ENV: &str = "HOME";

pub fn find_config_file(use_local: bool) -> PathBuf {
    resolve_config_path(
        use_local,
        std::env::var_os(CONFIG_PATH_ENV),
        std::env::var_os(USER_DIR_ENV),
    )
}

/// Lookup order: explicit path, `./config.toml` for local runs, the per-user
/// config dir if the file exists there, `./config.toml` again.
fn resolve_config_path(
    use_local: bool,
    explicit: Option<OsString>,
    user_dir: Option<OsString>,
) -> PathBuf {
    if let Some(path) = explicit.filter(|p| !p.is_empty()) {
        return PathBuf::from(path);
    }

    if use_local {
        return PathBuf::from(LOCAL_CONFIG);
    }

    if let Some(dir) = user_dir {
        let mut path = PathBuf::from(dir);
        if cfg!(not(windows)) {
            path.push(".config");
        }
        path.push(crate::APPLICATION_NAME);
        path.push("config.toml");

        if path.is_file() {
            return path;
        }
    }

    PathBuf::from(LOCAL_CONFIG)
}

pub fn read_config(use_local: bool) -> ConfigResult<Vec<u8>> {
    read_config_file(&find_config_file(use_local))
}

pub fn read_config_file(path: &Path) -> ConfigResult<Vec<u8>> {
    if !path.is_file() {
        tracing::trace!("no config at {}", path.display());
        return Err(ConfigError::ConfigNotFound);
    }

    tracing::debug!("using {} as configuration file", path.display());
    Ok(std::fs::read(path)?)
}

#[cfg(test)]
mod test {
    use std::fs;

    use super::*;

    #[test]
    fn explicit_path_wins() {
        let path = resolve_config_path(true, Some("/etc/course.toml".into()), None);
        assert_eq!(path, PathBuf::from("/etc/course.toml"));
    }

    #[test]
    fn local_run_uses_working_dir() {
        assert_eq!(resolve_config_path(true, None, None), PathBuf::from(LOCAL_CONFIG));
        assert_eq!(
            resolve_config_path(false, Some("".into()), None),
            PathBuf::from(LOCAL_CONFIG)
        );
    }

    #[test]
    fn user_dir_used_when_file_exists() {
        let home = tempfile::tempdir().unwrap();
        let mut dir = home.path().to_path_buf();
        if cfg!(not(windows)) {
            dir.push(".config");
        }
        dir.push(crate::APPLICATION_NAME);

        let user_dir = Some(home.path().as_os_str().to_owned());
        assert_eq!(
            resolve_config_path(false, None, user_dir.clone()),
            PathBuf::from(LOCAL_CONFIG)
        );

        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("config.toml"), "[host]").unwrap();
        assert_eq!(resolve_config_path(false, None, user_dir), dir.join("config.toml"));
    }

    #[test]
    fn read_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("config.toml");
        fs::write(&file, b"foo = 'bar'").unwrap();

        assert_eq!(read_config_file(&file).unwrap(), b"foo = 'bar'");
    }

    #[test]
    fn read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_config_file(&dir.path().join("nope.toml"));
        assert!(matches!(result, Err(ConfigError::ConfigNotFound)));
    }
}
