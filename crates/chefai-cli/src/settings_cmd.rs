//! `chefai settings` commands: view and change the operator settings kept
//! in the config file.

use anyhow::{Result, bail};

use chefai_core::roles::Capability;
use chefai_core::settings::{SettingKey, Settings, mask_secret};

use crate::config::{self, ConfigFile};

/// Run `settings show`.
pub fn run_show() -> Result<()> {
    let file = config::load_config_or_default()?;
    print!("{}", format_settings(&file.settings()));
    Ok(())
}

/// Run `settings set <key> <value>`.
pub fn run_set(key: &str, value: &str) -> Result<()> {
    let mut file = config::load_config_or_default()?;
    let key = apply_setting(&mut file, key, value)?;
    config::save_config(&file)?;

    let stored = file.settings();
    let shown = display_value(key, stored.get(key));
    println!("{key} = {shown}");
    Ok(())
}

/// Change one setting in `file` on behalf of the operator it names.
fn apply_setting(file: &mut ConfigFile, key: &str, value: &str) -> Result<SettingKey> {
    let operator = file.operator();
    if !operator.can(Capability::ManageOptions) {
        bail!(
            "you do not have permission to {} (operator role is {})",
            Capability::ManageOptions,
            operator.role
        );
    }

    let key: SettingKey = key.parse()?;
    let mut settings = file.settings();
    settings.set(key, value)?;
    file.set_settings(settings);
    Ok(key)
}

fn display_value(key: SettingKey, value: &str) -> String {
    if key.is_secret() {
        mask_secret(value)
    } else {
        value.to_string()
    }
}

fn format_settings(settings: &Settings) -> String {
    SettingKey::ALL
        .into_iter()
        .map(|key| format!("{key} = {}\n", display_value(key, settings.get(key))))
        .collect()
}
