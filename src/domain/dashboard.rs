//! Role-specific dashboards backed by fixed demo data.

use chrono::NaiveDate;
use serde::Serialize;

use super::users::{User, UserRole};

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum FileStatus {
    Planning,
    Estimation,
    Completed,
}

/// A deliverable shared with a client.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectFile {
    pub id: String,
    pub project_name: String,
    #[serde(rename = "type")]
    pub file_type: String,
    pub date: NaiveDate,
    pub status: FileStatus,
    pub download_url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthlyProfit {
    pub month: String,
    pub revenue: i64,
    pub expenses: i64,
    pub profit: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatCard {
    pub title: String,
    pub value: String,
    pub trend: String,
}

/// Dashboard content, selected by the viewer's role.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Dashboard {
    Admin {
        stats: Vec<StatCard>,
        monthly: Vec<MonthlyProfit>,
    },
    Client {
        user: User,
        files: Vec<ProjectFile>,
    },
}

impl Dashboard {
    /// Build the dashboard for `user`; guests have none.
    pub fn for_user(user: User) -> Option<Self> {
        match user.role {
            UserRole::Admin => Some(Self::Admin {
                stats: admin_stats(),
                monthly: monthly_profit(),
            }),
            UserRole::Client => Some(Self::Client {
                user,
                files: client_files(),
            }),
            UserRole::Guest => None,
        }
    }
}

fn admin_stats() -> Vec<StatCard> {
    [
        ("Total Profit (YTD)", "$171,012", "+12.5%"),
        ("Active Projects", "24", "+4.0%"),
        ("New Clients", "8", "+2.0%"),
    ]
    .into_iter()
    .map(|(title, value, trend)| StatCard {
        title: title.to_string(),
        value: value.to_string(),
        trend: trend.to_string(),
    })
    .collect()
}

fn monthly_profit() -> Vec<MonthlyProfit> {
    [
        ("Jan", 40000, 24000, 16000),
        ("Feb", 30000, 13980, 16020),
        ("Mar", 20000, 9800, 10200),
        ("Apr", 27800, 3908, 23892),
        ("May", 18900, 4800, 14100),
        ("Jun", 23900, 3800, 20100),
        ("Jul", 34900, 4300, 30600),
        ("Aug", 45000, 5000, 40000),
    ]
    .into_iter()
    .map(|(month, revenue, expenses, profit)| MonthlyProfit {
        month: month.to_string(),
        revenue,
        expenses,
        profit,
    })
    .collect()
}

fn client_files() -> Vec<ProjectFile> {
    [
        ("1", "Lakeside Villa", "Architectural Plan", (2023, 10, 15), FileStatus::Completed),
        ("2", "Lakeside Villa", "Cost Estimation PDF", (2023, 10, 20), FileStatus::Completed),
        ("3", "Downtown Commercial", "Structural Draft", (2023, 11, 2), FileStatus::Estimation),
    ]
    .into_iter()
    .filter_map(|(id, project, file_type, (y, m, d), status)| {
        Some(ProjectFile {
            id: id.to_string(),
            project_name: project.to_string(),
            file_type: file_type.to_string(),
            date: NaiveDate::from_ymd_opt(y, m, d)?,
            status,
            download_url: "#".to_string(),
        })
    })
    .collect()
}
