use crate::directory::Channel;
use std::fmt::Write;

const HEADER: &str = r#"#EXTM3U x-tvg-url="https://www.tsepg.cf/epg.xml.gz""#;
const LOGO_PREFIX: &str =
    "https://mediaready.videoready.tv/tatasky-epg/image/fetch/f_auto,fl_lossy,q_auto,h_250,w_250/";

/// Render an M3U playlist pointing every channel with a DASH stream back at
/// `host`. `license_url` may contain `{id}`, which is replaced by the channel id.
pub fn render(channels: &[Channel], host: &str, license_url: Option<&str>) -> String {
    let mut text = String::new();
    text.push_str(HEADER);
    text.push('\n');

    for channel in channels {
        let Some(url) = channel.manifest_url() else {
            continue;
        };

        let genre = channel
            .channel_genre
            .as_ref()
            .and_then(|x| x.first())
            .map(String::as_str)
            .unwrap_or_default();

        let _ = writeln!(
            text,
            r#"#EXTINF:-1 tvg-id="{}" tvg-country="IN" catchup-days="7" tvg-logo="{}{}" group-title="{}",{}"#,
            channel.id,
            LOGO_PREFIX,
            channel.channel_logo.as_deref().unwrap_or_default(),
            genre,
            channel.channel_name.as_deref().unwrap_or(&channel.id),
        );
        text.push_str("#KODIPROP:inputstream.adaptive.license_type=clearkey\n");

        if let Some(license_url) = license_url {
            let _ = writeln!(
                text,
                "#KODIPROP:inputstream.adaptive.license_key={}",
                license_url.replace("{id}", &channel.id)
            );
        }

        text.push_str("#EXTVLCOPT:http-user-agent=third-party\n");
        let _ = writeln!(text, "https://{}/{}.{}\n", host, channel.id, extension(url));
    }

    text
}

fn extension(url: &str) -> &str {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.rsplit_once('.').map(|x| x.1).unwrap_or("mpd")
}
