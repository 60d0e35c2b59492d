//! Text rendering of snapshots in the status bot's message format.

use wgstatus_types::{Cluster, RankingGroup, Server, Snapshot, UNKNOWN};

/// The only text shown to users when a poll fails.
pub const STATUS_UNAVAILABLE: &str = "Статус серверов недоступен";

pub const TITLE: &str = "Статус серверов World Of Tanks";

pub const DISCLAIMER: &str =
    "Все данные взяты из открытых источников, автор не несет ответственности за правильность данных.";

pub const FOOTER: &str = "При поддержке https://wgstatus.com/";

const DETAIL_HINT: &str =
    "⚠ Для более подробной информации об отдельном сервере укажите параметр `--cluster <номер>`";

/// Overview of every cluster, numbered by snapshot index.
pub fn overview(snapshot: &Snapshot) -> String {
    let mut out = format!("{}\n{}\n\n{}\n", TITLE, DISCLAIMER, DETAIL_HINT);

    for (index, cluster) in snapshot.clusters().iter().enumerate() {
        out.push_str(&format!("\n[{}] {}", index, cluster_block(cluster)));
    }

    out.push_str(&format!("\n{}", FOOTER));
    out
}

/// Cluster header followed by one line per server.
pub fn cluster_detail(cluster: &Cluster) -> String {
    let mut out = format!("{}\n{}\n\n{}", TITLE, DISCLAIMER, cluster_block(cluster));

    for server in cluster.servers() {
        out.push_str(&format!(
            "\n{}\n{}\n",
            server_title(server),
            server_line(server)
        ));
    }

    out.push_str(&format!("\n{}", FOOTER));
    out
}

/// Ranking group name followed by `host: majority` lines.
pub fn ranking(group: &RankingGroup) -> String {
    let mut out = format!("{}\n", group.name());
    for host in group.hosts() {
        out.push_str(&format!(
            "{}: {}\n",
            host.name,
            host.majority.as_deref().unwrap_or(UNKNOWN)
        ));
    }
    out
}

/// Text shown when `--cluster` names an index the snapshot does not have.
pub fn cluster_not_found(index: usize, available: usize) -> String {
    format!("Кластер [{}] не найден, доступно кластеров: {}", index, available)
}

/// User-facing text for a failed poll.
pub fn failure() -> &'static str {
    STATUS_UNAVAILABLE
}

fn cluster_block(cluster: &Cluster) -> String {
    let heading = match cluster.flag_emoji() {
        flag if flag.is_empty() => cluster.title().to_string(),
        flag => format!("{} {}", cluster.title(), flag),
    };

    format!(
        "{}\nВерсия: **{}**\nПоследнее обновление: {}\nОбщий онлайн: `{}`\n",
        heading,
        cluster.version(),
        updated_at(cluster),
        cluster.online()
    )
}

fn updated_at(cluster: &Cluster) -> String {
    cluster
        .version_updated_at()
        .map(|at| format!("<t:{}>", at.timestamp()))
        .unwrap_or_else(|_| UNKNOWN.to_string())
}

fn server_title(server: &Server) -> String {
    format!("Название: `{}`", server.name())
}

// Known count: "<emoji> Онлайн: `N`"; otherwise the status word stands in.
fn server_line(server: &Server) -> String {
    match server.online().count() {
        Some(count) => format!("{} Онлайн: `{}`", server.status_emoji(), count),
        None => format!("{} {}", server.status_emoji(), server.status_word()),
    }
}
