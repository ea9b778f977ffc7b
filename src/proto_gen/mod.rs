// Generated by the build script from resources/phonemetadata.proto and
// resources/phonenumber.proto.
include!(concat!(env!("OUT_DIR"), "/proto_gen/mod.rs"));
