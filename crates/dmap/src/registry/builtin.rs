//! Built-in DAAP/DMAP content codes.
//!
//! Codes are stored in their wire form: lower case, except the Apple
//! extension codes (`ae..`, `ce..`) whose suffix is upper case, and
//! `f\x8dch`, which contains a non-ASCII byte.

use crate::model::Kind;

/// `(code, semantic name, kind)` for every built-in tag.
pub const BUILTIN_TAGS: &[([u8; 4], &str, Kind)] = &[
    (*b"abal", "daap.browsealbumlisting", Kind::List),
    (*b"abar", "daap.browseartistlisting", Kind::List),
    (*b"abcp", "daap.browsecomposerlisting", Kind::List),
    (*b"abgn", "daap.browsegenrelisting", Kind::List),
    (*b"abpl", "daap.baseplaylist", Kind::Byte),
    (*b"abro", "daap.databasebrowse", Kind::List),
    (*b"adbs", "daap.databasesongs", Kind::List),
    (*b"aeAI", "com.apple.itunes.itms-artistid", Kind::Integer),
    (*b"aeCI", "com.apple.itunes.itms-composerid", Kind::Integer),
    (*b"aeCR", "com.apple.itunes.content-rating", Kind::String),
    (*b"aeEN", "com.apple.itunes.episode-num-str", Kind::String),
    (*b"aeES", "com.apple.itunes.episode-sort", Kind::Integer),
    (*b"aeFP", "com.apple.itunes.req-fplay", Kind::Byte),
    (*b"aeGD", "com.apple.itunes.gapless-enc-dr", Kind::Integer),
    (*b"aeGE", "com.apple.itunes.gapless-enc-del", Kind::Integer),
    (*b"aeGH", "com.apple.itunes.gapless-heur", Kind::Integer),
    (*b"aeGI", "com.apple.itunes.itms-genreid", Kind::Integer),
    (*b"aeGR", "com.apple.itunes.gapless-resy", Kind::Long),
    (*b"aeGU", "com.apple.itunes.gapless-dur", Kind::Long),
    (*b"aeHD", "com.apple.itunes.is-hd-video", Kind::Byte),
    (*b"aeHV", "com.apple.itunes.has-video", Kind::Byte),
    (*b"aeMK", "com.apple.itunes.mediakind", Kind::Byte),
    (*b"aeNN", "com.apple.itunes.network-name", Kind::String),
    (*b"aeNV", "com.apple.itunes.norm-volume", Kind::Integer),
    (*b"aePC", "com.apple.itunes.is-podcast", Kind::Byte),
    (*b"aePI", "com.apple.itunes.itms-playlistid", Kind::Integer),
    (*b"aePP", "com.apple.itunes.is-podcast-playlist", Kind::Byte),
    (*b"aePS", "com.apple.itunes.special-playlist", Kind::Byte),
    (*b"aeSF", "com.apple.itunes.itms-storefrontid", Kind::Integer),
    (*b"aeSG", "com.apple.itunes.saved-genius", Kind::Byte),
    (*b"aeSI", "com.apple.itunes.itms-songid", Kind::Integer),
    (*b"aeSN", "com.apple.itunes.series-name", Kind::String),
    (*b"aeSP", "com.apple.itunes.smart-playlist", Kind::Byte),
    (*b"aeSU", "com.apple.itunes.season-num", Kind::Integer),
    (*b"aeSV", "com.apple.itunes.music-sharing-version", Kind::Integer),
    (*b"agrp", "daap.songgrouping", Kind::String),
    (*b"aply", "daap.databaseplaylists", Kind::List),
    (*b"aprm", "daap.playlistrepeatmode", Kind::Byte),
    (*b"apro", "daap.protocolversion", Kind::Version),
    (*b"apsm", "daap.playlistshufflemode", Kind::Byte),
    (*b"apso", "daap.playlistsongs", Kind::List),
    (*b"arif", "daap.resolveinfo", Kind::List),
    (*b"arsv", "daap.resolve", Kind::List),
    (*b"asaa", "daap.songalbumartist", Kind::String),
    (*b"asai", "daap.songalbumid", Kind::Long),
    (*b"asal", "daap.songalbum", Kind::String),
    (*b"asar", "daap.songartist", Kind::String),
    (*b"asbk", "daap.bookmarkable", Kind::Byte),
    (*b"asbo", "daap.songbookmark", Kind::Integer),
    (*b"asbr", "daap.songbitrate", Kind::Short),
    (*b"asbt", "daap.songbeatsperminute", Kind::Short),
    (*b"ascd", "daap.songcodectype", Kind::Integer),
    (*b"ascm", "daap.songcomment", Kind::String),
    (*b"ascn", "daap.songcontentdescription", Kind::String),
    (*b"asco", "daap.songcompilation", Kind::Byte),
    (*b"ascp", "daap.songcomposer", Kind::String),
    (*b"ascr", "daap.songcontentrating", Kind::Byte),
    (*b"ascs", "daap.songcodecsubtype", Kind::Integer),
    (*b"asct", "daap.songcategory", Kind::String),
    (*b"asda", "daap.songdateadded", Kind::Time),
    (*b"asdb", "daap.songdisabled", Kind::Byte),
    (*b"asdc", "daap.songdisccount", Kind::Short),
    (*b"asdk", "daap.songdatakind", Kind::Byte),
    (*b"asdm", "daap.songdatemodified", Kind::Time),
    (*b"asdn", "daap.songdiscnumber", Kind::Short),
    (*b"asdp", "daap.songdatepurchased", Kind::Time),
    (*b"asdr", "daap.songdatereleased", Kind::Time),
    (*b"asdt", "daap.songdescription", Kind::String),
    (*b"ased", "daap.songextradata", Kind::Short),
    (*b"aseq", "daap.songeqpreset", Kind::String),
    (*b"asfm", "daap.songformat", Kind::String),
    (*b"asgn", "daap.songgenre", Kind::String),
    (*b"asgp", "daap.songgapless", Kind::Byte),
    (*b"ashp", "daap.songhasbeenplayed", Kind::Byte),
    (*b"asky", "daap.songkeywords", Kind::String),
    (*b"aslc", "daap.songlongcontentdescription", Kind::String),
    (*b"asls", "daap.songlongsize", Kind::Long),
    (*b"aspu", "daap.songpodcasturl", Kind::String),
    (*b"asrv", "daap.songrelativevolume", Kind::SignedByte),
    (*b"assa", "daap.sortartist", Kind::String),
    (*b"assc", "daap.sortcomposer", Kind::String),
    (*b"assl", "daap.sortalbumartist", Kind::String),
    (*b"assn", "daap.sortname", Kind::String),
    (*b"assp", "daap.songstoptime", Kind::Integer),
    (*b"assr", "daap.songsamplerate", Kind::Integer),
    (*b"asss", "daap.sortseriesname", Kind::String),
    (*b"asst", "daap.songstarttime", Kind::Integer),
    (*b"assu", "daap.sortalbum", Kind::String),
    (*b"assz", "daap.songsize", Kind::Integer),
    (*b"astc", "daap.songtrackcount", Kind::Short),
    (*b"astm", "daap.songtime", Kind::Integer),
    (*b"astn", "daap.songtracknumber", Kind::Short),
    (*b"asul", "daap.songdataurl", Kind::String),
    (*b"asur", "daap.songuserrating", Kind::Byte),
    (*b"asyr", "daap.songyear", Kind::Short),
    (*b"ated", "daap.supportsextradata", Kind::Short),
    (*b"avdb", "daap.serverdatabases", Kind::List),
    (*b"ceJC", "com.apple.itunes.jukebox-client-vote", Kind::SignedByte),
    (*b"ceJI", "com.apple.itunes.jukebox-current", Kind::Integer),
    (*b"ceJS", "com.apple.itunes.jukebox-score", Kind::SignedShort),
    (*b"ceJV", "com.apple.itunes.jukebox-vote", Kind::Integer),
    (*b"f\x8dch", "dmap.haschildcontainers", Kind::Byte),
    (*b"mbcl", "dmap.bag", Kind::List),
    (*b"mccr", "dmap.contentcodesresponse", Kind::List),
    (*b"mcna", "dmap.contentcodesname", Kind::String),
    (*b"mcnm", "dmap.contentcodesnumber", Kind::Integer),
    (*b"mcon", "dmap.container", Kind::List),
    (*b"mctc", "dmap.containercount", Kind::Integer),
    (*b"mcti", "dmap.containeritemid", Kind::Integer),
    (*b"mcty", "dmap.contentcodestype", Kind::Short),
    (*b"mdcl", "dmap.dictionary", Kind::List),
    (*b"meds", "dmap.editcommandssupported", Kind::Integer),
    (*b"miid", "dmap.itemid", Kind::Integer),
    (*b"mikd", "dmap.itemkind", Kind::Byte),
    (*b"mimc", "dmap.itemcount", Kind::Integer),
    (*b"minm", "dmap.itemname", Kind::String),
    (*b"mlcl", "dmap.listing", Kind::List),
    (*b"mlid", "dmap.sessionid", Kind::Integer),
    (*b"mlit", "dmap.listingitem", Kind::List),
    (*b"mlog", "dmap.loginresponse", Kind::List),
    (*b"mpco", "dmap.parentcontainerid", Kind::Integer),
    (*b"mper", "dmap.persistentid", Kind::Long),
    (*b"mpro", "dmap.protocolversion", Kind::Version),
    (*b"mrco", "dmap.returnedcount", Kind::Integer),
    (*b"msal", "dmap.supportsautologout", Kind::Byte),
    (*b"msas", "dmap.authenticationschemes", Kind::Integer),
    (*b"msau", "dmap.authenticationmethod", Kind::Byte),
    (*b"msbr", "dmap.supportsbrowse", Kind::Byte),
    (*b"msdc", "dmap.databasescount", Kind::Integer),
    (*b"msed", "unknown_msed", Kind::Byte),
    (*b"msex", "dmap.supportsextensions", Kind::Byte),
    (*b"msix", "dmap.supportsindex", Kind::Byte),
    (*b"mslr", "dmap.loginrequired", Kind::Byte),
    (*b"msma", "unknown_msma", Kind::Long),
    (*b"msml", "unknown_msml", Kind::List),
    (*b"mspi", "dmap.supportspersistentids", Kind::Byte),
    (*b"msqy", "dmap.supportsquery", Kind::Byte),
    (*b"msrs", "dmap.supportsresolve", Kind::Byte),
    (*b"msrv", "dmap.serverinforesponse", Kind::List),
    (*b"mstc", "dmap.utctime", Kind::Time),
    (*b"mstm", "dmap.timeoutinterval", Kind::Integer),
    (*b"msto", "dmap.utcoffset", Kind::SignedInteger),
    (*b"msts", "dmap.statusstring", Kind::String),
    (*b"mstt", "dmap.status", Kind::Integer),
    (*b"msup", "dmap.supportsupdate", Kind::Byte),
    (*b"mtco", "dmap.specifiedtotalcount", Kind::Integer),
    (*b"mudl", "dmap.deletedidlisting", Kind::List),
    (*b"mupd", "dmap.updateresponse", Kind::List),
    (*b"musr", "dmap.serverrevision", Kind::Integer),
    (*b"muty", "dmap.updatetype", Kind::Byte),
];
