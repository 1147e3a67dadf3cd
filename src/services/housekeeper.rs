/*
 * Copyright (c) 2020-2022, Stalwart Labs Ltd.
 *
 * This file is part of the Stalwart EWS Server.
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as
 * published by the Free Software Foundation, either version 3 of
 * the License, or (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU Affero General Public License for more details.
 * in the LICENSE file at the top-level directory of this distribution.
 * You should have received a copy of the GNU Affero General Public License
 * along with this program.  If not, see <http://www.gnu.org/licenses/>.
 *
 * You can be released from the requirements of the AGPLv3 license by
 * purchasing a commercial license. Please contact licensing@stalw.art
 * for more details.
*/

use std::time::{Duration, SystemTime};

use actix_web::web;
use store::{
    chrono::{self, Datelike, TimeZone, Utc},
    config::env_settings::EnvSettings,
    tracing::{debug, error, info},
};
use tokio::sync::mpsc;

use crate::{
    server::{failed_to, UnwrapFailure},
    EWSServer,
};

pub enum Event {
    PurgeRecoverable,
    Exit,
}

#[derive(Debug, PartialEq, Eq)]
pub enum SimpleCron {
    EveryDay { hour: u32, minute: u32 },
    EveryWeek { day: u32, hour: u32, minute: u32 },
}

const CHANNEL_BUFFER: usize = 128;

pub fn spawn_housekeeper(
    core: web::Data<EWSServer>,
    settings: &EnvSettings,
    mut rx: mpsc::Receiver<Event>,
) {
    let purge_recoverable_at = SimpleCron::parse(
        &settings
            .get("schedule-purge-recoverable")
            .unwrap_or_else(|| "0 3 *".to_string()),
    );

    tokio::spawn(async move {
        debug!("Housekeeper task started.");
        loop {
            let time_to_next = purge_recoverable_at.time_to_next();
            let start_time = now_secs();
            let mut do_purge = false;

            match tokio::time::timeout(time_to_next, rx.recv()).await {
                Ok(Some(Event::PurgeRecoverable)) => do_purge = true,
                Ok(Some(Event::Exit)) | Ok(None) => {
                    debug!("Housekeeper task exiting.");
                    return;
                }
                Err(_) => (),
            }

            if do_purge || start_time + time_to_next.as_secs() <= now_secs() {
                let core = core.clone();
                tokio::spawn(async move {
                    info!("Purging soft deleted items.");
                    let mailbox = core.mailbox.clone();
                    let result = core
                        .spawn_worker(move || {
                            let retention = chrono::Duration::from_std(
                                mailbox.store.config.recoverable_retention,
                            )
                            .unwrap_or_else(|_| chrono::Duration::days(14));
                            mailbox.store.purge_recoverable(Utc::now() - retention)
                        })
                        .await;

                    match result {
                        Ok(purged) => debug!("Purged {} soft deleted items.", purged),
                        Err(err) => error!("Error while running housekeeper task: {}", err),
                    }
                });
            }
        }
    });
}

pub fn init_housekeeper() -> (mpsc::Sender<Event>, mpsc::Receiver<Event>) {
    mpsc::channel::<Event>(CHANNEL_BUFFER)
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

impl SimpleCron {
    pub fn parse(value: &str) -> Self {
        let mut hour = 0;
        let mut minute = 0;

        for (pos, value) in value.split(' ').enumerate() {
            if pos == 0 {
                minute = value.parse::<u32>().failed_to("parse minute.");
                if !(0..=59).contains(&minute) {
                    failed_to(&format!("parse minute, invalid value: {}", minute));
                }
            } else if pos == 1 {
                hour = value.parse::<u32>().failed_to("parse hour.");
                if !(0..=23).contains(&hour) {
                    failed_to(&format!("parse hour, invalid value: {}", hour));
                }
            } else if pos == 2 {
                if value.as_bytes().first().failed_to("parse weekday") == &b'*' {
                    return SimpleCron::EveryDay { hour, minute };
                } else {
                    let day = value.parse::<u32>().failed_to("parse weekday.");
                    if !(1..=7).contains(&day) {
                        failed_to(&format!(
                            "parse weekday, invalid value: {}, range is 1 (Monday) to 7 (Sunday).",
                            day,
                        ));
                    }

                    return SimpleCron::EveryWeek { day, hour, minute };
                }
            }
        }

        failed_to("parse cron expression.");
    }

    pub fn time_to_next(&self) -> Duration {
        let now = chrono::Local::now();
        let today = |hour: u32, minute: u32| {
            chrono::Local
                .with_ymd_and_hms(now.year(), now.month(), now.day(), hour, minute, 0)
                .earliest()
                .unwrap_or(now)
        };
        let next = match self {
            SimpleCron::EveryDay { hour, minute } => {
                let next = today(*hour, *minute);
                if next < now {
                    next + chrono::Duration::days(1)
                } else {
                    next
                }
            }
            SimpleCron::EveryWeek { day, hour, minute } => {
                let next = today(*hour, *minute);
                let weekday = now.weekday().number_from_monday();
                let days = (*day + 7 - weekday) % 7;
                let next = next + chrono::Duration::days(days.into());
                if next < now {
                    next + chrono::Duration::weeks(1)
                } else {
                    next
                }
            }
        };

        (next - now).to_std().unwrap_or(Duration::from_secs(60))
    }
}
