use super::{Manifest, Template, rewrite::SEGMENT_PATH};
use dash_mpd::{AdaptationSet, MPD, Representation, SegmentTemplate};
use log::{debug, warn};
use url::Url;

/// Url of the first audio segment, the one carrying the `pssh` box.
///
/// Only the first audio adaptation set is consulted. Its first representation
/// with a usable `SegmentTemplate@media` (own or inherited) is resolved with
/// `$Number$` set to the template `startNumber` and anchored at
/// `<origin>/dash/`.
pub fn init_segment_url(manifest: &Manifest) -> Option<Url> {
    let mpd = match dash_mpd::parse(&manifest.text) {
        Ok(x) => x,
        Err(e) => {
            warn!("Cannot parse manifest from {}: {}", manifest.url, e);
            return None;
        }
    };

    let Some(adaptation_set) = audio_adaptation_set(&mpd) else {
        debug!("No audio adaptation set in {}", manifest.url);
        return None;
    };

    let (representation, segment_template, media) = adaptation_set
        .representations
        .iter()
        .find_map(|x| {
            let segment_template = x
                .SegmentTemplate
                .as_ref()
                .or(adaptation_set.SegmentTemplate.as_ref())?;
            let media = segment_template.media.as_deref()?;
            Some((x, segment_template, media))
        })?;

    let media = template(representation, segment_template).resolve(media);
    let url = manifest.url.join(&format!("/{SEGMENT_PATH}{media}"));

    match url {
        Ok(x) => Some(x),
        Err(e) => {
            warn!("Cannot build segment url from '{}': {}", media, e);
            None
        }
    }
}

fn audio_adaptation_set(mpd: &MPD) -> Option<&AdaptationSet> {
    let adaptation_sets = || mpd.periods.iter().flat_map(|x| x.adaptations.iter());

    adaptation_sets()
        .find(|x| x.contentType.as_deref() == Some("audio"))
        .or_else(|| {
            adaptation_sets().find(|x| {
                x.mimeType
                    .as_deref()
                    .is_some_and(|y| y.starts_with("audio/"))
            })
        })
}

fn template(representation: &Representation, segment_template: &SegmentTemplate) -> Template {
    let mut template = Template::default();

    if let Some(id) = &representation.id {
        template.insert("RepresentationID", id.to_owned());
    }

    if let Some(bandwidth) = representation.bandwidth {
        template.insert("Bandwidth", bandwidth.to_string());
    }

    template.insert(
        "Number",
        segment_template.startNumber.unwrap_or(1).to_string(),
    );
    template
}

#[cfg(test)]
mod tests {
    use super::*;

    const MPD: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<MPD xmlns="urn:mpeg:dash:schema:mpd:2011" type="static" mediaPresentationDuration="PT60S" minBufferTime="PT2S" profiles="urn:mpeg:dash:profile:isoff-live:2011">
  <Period id="1" start="PT0S">
    <BaseURL>dash/</BaseURL>
    <AdaptationSet id="1" contentType="video" mimeType="video/mp4">
      <SegmentTemplate timescale="1000" media="v-$RepresentationID$-$Number$.m4s" initialization="v-$RepresentationID$.dash" duration="4000"/>
      <Representation id="video=226400" bandwidth="226400" width="426" height="240"/>
    </AdaptationSet>
    {AUDIO}
  </Period>
</MPD>"#;

    fn manifest(audio: &str) -> Manifest {
        Manifest {
            text: MPD.replace("{AUDIO}", audio),
            url: "https://bpprod6linear.akamaized.net/bpk-tv/ch/output/master.mpd?x=1"
                .parse()
                .unwrap(),
        }
    }

    #[test]
    fn test_representation_template() {
        let manifest = manifest(
            r#"<AdaptationSet id="2" contentType="audio" mimeType="audio/mp4">
      <Representation id="audio_hin=128000" bandwidth="128000">
        <SegmentTemplate timescale="48000" media="a-$RepresentationID$-$Number$.m4s" startNumber="5" duration="192000"/>
      </Representation>
    </AdaptationSet>"#,
        );

        assert_eq!(
            init_segment_url(&manifest).unwrap().as_str(),
            "https://bpprod6linear.akamaized.net/dash/a-audio_hin=128000-5.m4s"
        );
    }

    #[test]
    fn test_inherited_template() {
        let manifest = manifest(
            r#"<AdaptationSet id="2" mimeType="audio/mp4">
      <SegmentTemplate timescale="48000" media="a-$RepresentationID$-$Number%03d$.m4s" duration="192000"/>
      <Representation id="audio_eng=96000" bandwidth="96000"/>
    </AdaptationSet>"#,
        );

        assert_eq!(
            init_segment_url(&manifest).unwrap().as_str(),
            "https://bpprod6linear.akamaized.net/dash/a-audio_eng=96000-001.m4s"
        );
    }

    #[test]
    fn test_no_audio() {
        assert!(init_segment_url(&manifest("")).is_none());
    }

    #[test]
    fn test_not_a_manifest() {
        let manifest = Manifest {
            text: "<html>gateway timeout</html>".to_owned(),
            url: "https://bpprod6linear.akamaized.net/master.mpd".parse().unwrap(),
        };
        assert!(init_segment_url(&manifest).is_none());
    }
}
